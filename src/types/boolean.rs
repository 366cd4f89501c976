use super::detail::Detail;
use super::error::TypeError;
use super::reference::Options;
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "boolean";

const TRUTHY: [&str; 4] = ["enabled", "true", "1", "yes"];
const FALSY: [&str; 4] = ["disabled", "false", "0", "no"];

/// Booleans from a fixed, case-sensitive token set.
#[derive(Debug, Clone, Copy)]
pub struct Boolean;

impl Cast for Boolean {
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

        let token = match raw {
            Value::Bool(_) | Value::Integer(_) => raw.to_text(),
            other => match other.as_text() {
                Some(s) => s.into(),
                None => return Ok(Outcome::Fail),
            },
        };

        if TRUTHY.contains(&&*token) {
            Ok(Outcome::Ok(Value::Bool(true)))
        } else if FALSY.contains(&&*token) {
            Ok(Outcome::Ok(Value::Bool(false)))
        } else {
            Ok(Outcome::validation(Detail::enumerate(
                "must be one of ",
                TRUTHY.iter().chain(FALSY.iter()).copied(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Registry, TypeRef};

    fn cast(raw: Value) -> Result<Value, crate::types::CastFailure> {
        Registry::new().cast(&raw, &TypeRef::new(ID)).unwrap()
    }

    #[test]
    fn test_accepts_all_tokens() {
        for t in TRUTHY {
            assert_eq!(cast(Value::from(t)), Ok(Value::Bool(true)));
        }
        for t in FALSY {
            assert_eq!(cast(Value::from(t)), Ok(Value::Bool(false)));
        }
    }

    #[test]
    fn test_pre_typed_values() {
        assert_eq!(cast(Value::Bool(true)), Ok(Value::Bool(true)));
        assert_eq!(cast(Value::Integer(0)), Ok(Value::Bool(false)));
        assert!(cast(Value::Integer(2)).is_err());
    }

    #[test]
    fn test_wrong_case_lists_every_token() {
        let failure = cast(Value::from("DISABLED")).unwrap_err();
        let [Detail::Validation(parts)] = failure.details.as_slice() else {
            panic!("expected a single validation entry: {:?}", failure.details);
        };
        let highlighted: Vec<&str> = parts
            .iter()
            .filter_map(|p| match p {
                Detail::Highlight(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            highlighted,
            vec!["enabled", "true", "1", "yes", "disabled", "false", "0", "no"]
        );
    }

    #[test]
    fn test_rejects_options() {
        let r = TypeRef::new(ID).with("strict", "yes");
        assert!(Registry::new().cast(&Value::from("yes"), &r).is_err());
    }
}
