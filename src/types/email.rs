use super::detail::Detail;
use super::error::TypeError;
use super::reference::Options;
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "email";

/// `local@domain` with exactly one `@` and both sides non-empty.
#[derive(Debug, Clone, Copy)]
pub struct Email;

impl Cast for Email {
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
        let Some(text) = raw.as_text() else {
            return Ok(Outcome::Fail);
        };

        match text.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Outcome::Ok(Value::String(text.to_string())))
            }
            _ => Ok(Outcome::parsing(vec![
                Detail::text("expected an address shaped like "),
                Detail::highlight("name@domain"),
            ])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CastResult, Registry, TypeRef};

    fn cast(raw: &str) -> CastResult {
        Registry::new()
            .cast(&Value::from(raw), &TypeRef::new(ID))
            .unwrap()
    }

    #[test]
    fn test_valid_address() {
        assert_eq!(cast("ops@example.com"), Ok(Value::from("ops@example.com")));
    }

    #[test]
    fn test_invalid_shapes() {
        for raw in ["example.com", "@example.com", "ops@", "a@b@c"] {
            assert!(cast(raw).unwrap_err().is_parsing(), "{raw}");
        }
    }
}
