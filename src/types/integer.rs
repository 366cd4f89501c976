use super::detail::Detail;
use super::error::TypeError;
use super::reference::{invalid, Options};
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "integer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Any,
    Positive,
}

fn scope(options: &Options) -> Result<Scope, TypeError> {
    options.ensure_known(ID, &["scope"])?;
    match options.text(ID, "scope")? {
        None => Ok(Scope::Any),
        Some("positive") => Ok(Scope::Positive),
        Some(other) => Err(invalid(ID, "scope", format!("unsupported scope '{other}'"))),
    }
}

/// Whole numbers, optionally restricted to `scope = "positive"`.
#[derive(Debug, Clone, Copy)]
pub struct Integer;

impl Cast for Integer {
    fn validate(&self, options: &Options, _caster: &Caster<'_>) -> Result<(), TypeError> {
        scope(options).map(|_| ())
    }

    fn cast(
        &self,
        raw: &Value,
        options: &Options,
        _caster: &Caster<'_>,
    ) -> Result<Outcome, TypeError> {
        let scope = scope(options)?;

        let n = match raw {
            Value::Integer(n) => *n,
            other => match other.as_text() {
                Some(text) => match parse(text) {
                    Ok(n) => n,
                    Err(outcome) => return Ok(outcome),
                },
                None => return Ok(Outcome::Fail),
            },
        };

        if scope == Scope::Positive && n <= 0 {
            return Ok(Outcome::validation(vec![
                Detail::text("must be "),
                Detail::highlight("positive"),
            ]));
        }
        Ok(Outcome::Ok(Value::Integer(n)))
    }
}

/// Parses `[+-]?digits` and rejects anything left over.
fn parse(text: &str) -> Result<i64, Outcome> {
    let digits_start = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return Err(Outcome::parsing(vec![Detail::text("not a whole number")]));
    }

    let end = digits_start + digits_len;
    let rest = &text[end..];
    if !rest.is_empty() {
        return Err(Outcome::parsing(vec![
            Detail::text("unexpected "),
            Detail::highlight(rest),
        ]));
    }

    text[..end]
        .parse::<i64>()
        .map_err(|_| Outcome::parsing(vec![Detail::text("out of range")]))
}
