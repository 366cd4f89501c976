use super::detail::Detail;
use super::error::TypeError;
use super::reference::Options;
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "string";

/// Non-blank UTF-8 text, returned with surrounding whitespace trimmed.
#[derive(Debug, Clone, Copy)]
pub struct Text;

impl Cast for Text {
    fn validate(&self, options: &Options, _caster: &Caster<'_>) -> Result<(), TypeError> {
        options.ensure_known(ID, &[])
    }

    fn cast(
        &self,
        raw: &Value,
        options: &Options,
        caster: &Caster<'_>,
    ) -> Result<Outcome, TypeError> {
        self.validate(options, caster)?;

        let text = match raw {
            Value::String(s) => s.as_str(),
            Value::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(s) => s,
                Err(_) => {
                    return Ok(Outcome::validation(vec![
                        Detail::text("is not valid "),
                        Detail::highlight("UTF-8"),
                    ]))
                }
            },
            _ => return Ok(Outcome::Fail),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Outcome::validation(vec![Detail::text("cannot be blank")]));
        }
        Ok(Outcome::Ok(Value::String(trimmed.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastResult, Registry, TypeRef};

    fn cast(raw: Value) -> CastResult {
        Registry::new().cast(&raw, &TypeRef::new(ID)).unwrap()
    }

    #[test]
    fn test_trims_and_keeps_inner_text() {
        assert_eq!(
            cast(Value::from("  Hello World ")),
            Ok(Value::from("Hello World"))
        );
    }

    #[test]
    fn test_blank_is_validation_failure() {
        let failure = cast(Value::from(" \t ")).unwrap_err();
        assert!(failure.is_validation());
    }

    #[test]
    fn test_invalid_utf8() {
        let failure = cast(Value::Bytes(vec![0xff, 0xfe])).unwrap_err();
        assert!(failure.is_validation());
        assert_eq!(cast(Value::Bytes(b"ok".to_vec())), Ok(Value::from("ok")));
    }
}
