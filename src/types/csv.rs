use ::csv::{ReaderBuilder, StringRecord, Trim};

use super::detail::Detail;
use super::error::TypeError;
use super::reference::{Options, TypeRef};
use super::registry::{Cast, Caster, Outcome};
use super::string;
use super::value::Value;

pub const ID: &str = "csv";

fn inner(options: &Options) -> Result<TypeRef, TypeError> {
    options.ensure_known(ID, &["of"])?;
    Ok(options
        .type_ref(ID, "of")?
        .unwrap_or_else(|| TypeRef::new(string::ID)))
}

/// A single comma-separated record whose fields are cast through `of`
/// (strings by default).
///
/// Every failing field is reported, not just the first one.
#[derive(Debug, Clone, Copy)]
pub struct Csv;

impl Cast for Csv {
    fn validate(&self, options: &Options, caster: &Caster<'_>) -> Result<(), TypeError> {
        caster.validate(&inner(options)?)
    }

    fn cast(
        &self,
        raw: &Value,
        options: &Options,
        caster: &Caster<'_>,
    ) -> Result<Outcome, TypeError> {
        let of = inner(options)?;
        let Some(text) = raw.as_text() else {
            return Ok(Outcome::Fail);
        };

        if let Some(offset) = unbalanced_quote(text) {
            return Ok(Outcome::parsing(vec![
                Detail::text("malformed quoting at byte "),
                Detail::highlight(offset.to_string()),
            ]));
        }

        let record = match single_record(text) {
            Ok(record) => record,
            Err(parts) => return Ok(Outcome::parsing(parts)),
        };

        let mut values = Vec::with_capacity(record.len());
        let mut failures = Vec::new();
        for field in record.iter() {
            match caster.cast(&Value::from(field), &of)? {
                Ok(value) => values.push(value),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(Outcome::Ok(Value::List(values)))
        } else {
            Ok(Outcome::Err(vec![Detail::Nested(failures)]))
        }
    }
}

fn single_record(text: &str) -> Result<StringRecord, Vec<Detail>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let first = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(vec![Detail::text(e.to_string())]),
        None => return Err(vec![Detail::text("expected a record, found nothing")]),
    };
    let extra = records.count();
    if extra > 0 {
        return Err(vec![
            Detail::text("expected a single record, found "),
            Detail::highlight((extra + 1).to_string()),
        ]);
    }
    Ok(first)
}

/// Byte offset of the first quote that breaks RFC 4180 quoting.
///
/// The reader itself is lenient about stray quotes, so this pass catches
/// unterminated quoted fields and quotes inside unquoted fields.
fn unbalanced_quote(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut field_start = true;
    while i < bytes.len() {
        match bytes[i] {
            b'"' if field_start => {
                let open = i;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => return Some(open),
                        Some(b'"') if bytes.get(i + 1) == Some(&b'"') => i += 2,
                        Some(b'"') => break,
                        Some(_) => i += 1,
                    }
                }
                i += 1;
                match bytes.get(i) {
                    None | Some(b',' | b'\n' | b'\r') => {}
                    Some(_) => return Some(i),
                }
                field_start = false;
            }
            b'"' => return Some(i),
            b',' | b'\n' | b'\r' => {
                field_start = true;
                i += 1;
            }
            _ => {
                field_start = false;
                i += 1;
            }
        }
    }
    None
}
