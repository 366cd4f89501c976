use std::collections::BTreeMap;

use super::detail::Detail;
use super::error::TypeError;
use super::reference::{invalid, Options};
use super::registry::{Cast, Caster, Outcome};
use super::symbol::Symbol;
use super::value::{Key, Value};

pub const ID: &str = "json";

/// How object keys are represented after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keys {
    /// Plain text keys.
    Strings,
    /// Symbols that already exist; other keys are dropped.
    Existing,
    /// Symbols, interned on demand.
    Interned,
}

fn keys(options: &Options) -> Result<Keys, TypeError> {
    options.ensure_known(ID, &["keys"])?;
    match options.text(ID, "keys")? {
        None | Some("strings") => Ok(Keys::Strings),
        Some("atoms") => Ok(Keys::Existing),
        Some("atoms!") => Ok(Keys::Interned),
        Some(other) => Err(invalid(ID, "keys", format!("unsupported key mode '{other}'"))),
    }
}

/// Well-formed JSON documents.
#[derive(Debug, Clone, Copy)]
pub struct Json;

impl Cast for Json {
    fn validate(&self, options: &Options, _caster: &Caster<'_>) -> Result<(), TypeError> {
        keys(options).map(|_| ())
    }

    fn cast(
        &self,
        raw: &Value,
        options: &Options,
        _caster: &Caster<'_>,
    ) -> Result<Outcome, TypeError> {
        let mode = keys(options)?;
        let Some(text) = raw.as_text() else {
            return Ok(Outcome::Fail);
        };

        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(doc) => Ok(Outcome::Ok(convert(doc, mode))),
            Err(e) => Ok(Outcome::parsing(vec![
                Detail::text(format!("{} at byte ", reason(&e))),
                Detail::highlight(byte_offset(text, e.line(), e.column()).to_string()),
            ])),
        }
    }
}

fn convert(doc: serde_json::Value, mode: Keys) -> Value {
    match doc {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(|v| convert(v, mode)).collect())
        }
        serde_json::Value::Object(object) => {
            let mut map = BTreeMap::new();
            for (k, v) in object {
                let key = match mode {
                    Keys::Strings => Key::Text(k),
                    Keys::Interned => Key::Symbol(Symbol::intern(&k)),
                    Keys::Existing => match Symbol::existing(&k) {
                        Some(sym) => Key::Symbol(sym),
                        None => continue,
                    },
                };
                map.insert(key, convert(v, mode));
            }
            Value::Map(map)
        }
    }
}

/// The error message without serde_json's trailing location.
fn reason(e: &serde_json::Error) -> String {
    let message = e.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let preceding: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (preceding + column.saturating_sub(1)).min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastResult, Registry, TypeRef};

    fn cast(raw: &str, type_ref: &TypeRef) -> CastResult {
        Registry::new().cast(&Value::from(raw), type_ref).unwrap()
    }

    #[test]
    fn test_string_keys_by_default() {
        let value = cast(r#"{"a": 1, "b": [true, null]}"#, &TypeRef::new(ID)).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map[&Key::Text("a".into())], Value::Integer(1));
        assert_eq!(
            map[&Key::Text("b".into())],
            Value::List(vec![Value::Bool(true), Value::Null])
        );
    }

    #[test]
    fn test_interned_keys() {
        let r = TypeRef::new(ID).with("keys", "atoms!");
        let value = cast(r#"{"json_test_interned_key": 1.5}"#, &r).unwrap();
        let sym = Symbol::existing("json_test_interned_key").unwrap();
        assert_eq!(value.as_map().unwrap()[&Key::Symbol(sym)], Value::Float(1.5));
    }

    #[test]
    fn test_existing_keys_drop_unknown_symbols() {
        Symbol::intern("json_test_known_key");
        let r = TypeRef::new(ID).with("keys", "atoms");
        let value = cast(
            r#"{"json_test_known_key": 1, "json_test_unknown_key": 2}"#,
            &r,
        )
        .unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert!(Symbol::existing("json_test_unknown_key").is_none());
    }

    #[test]
    fn test_syntax_error_reports_byte_offset() {
        let failure = cast("{\"a\": }", &TypeRef::new(ID)).unwrap_err();
        let [Detail::Parsing(parts)] = failure.details.as_slice() else {
            panic!("expected parsing failure: {:?}", failure.details);
        };
        assert_eq!(parts[1], Detail::highlight("6"));
    }

    #[test]
    fn test_byte_offset_on_later_line() {
        assert_eq!(byte_offset("ab\ncd", 2, 2), 4);
    }

    #[test]
    fn test_unknown_key_mode() {
        let r = TypeRef::new(ID).with("keys", "symbols");
        assert!(Registry::new().validate(&r).is_err());
    }
}
