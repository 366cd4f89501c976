use super::detail::Detail;
use super::error::TypeError;
use super::reference::{invalid, Options};
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "enum";

fn members(options: &Options) -> Result<&[Value], TypeError> {
    options.ensure_known(ID, &["values"])?;
    match options.list(ID, "values")? {
        None => Err(TypeError::MissingOption {
            type_id: ID.to_string(),
            option: "values".to_string(),
        }),
        Some([]) => Err(invalid(ID, "values", "must not be empty")),
        Some(values) => Ok(values),
    }
}

/// Membership in the `values` option, compared as text.
///
/// Succeeds with the matching member, so `values = [1, 2]` yields integers.
#[derive(Debug, Clone, Copy)]
pub struct Enumeration;

impl Cast for Enumeration {
    fn validate(&self, options: &Options, _caster: &Caster<'_>) -> Result<(), TypeError> {
        members(options).map(|_| ())
    }

    fn cast(
        &self,
        raw: &Value,
        options: &Options,
        _caster: &Caster<'_>,
    ) -> Result<Outcome, TypeError> {
        let members = members(options)?;
        let Some(text) = raw.as_text() else {
            return Ok(Outcome::Fail);
        };

        if let Some(member) = members.iter().find(|m| m.to_text() == text) {
            return Ok(Outcome::Ok(member.clone()));
        }
        Ok(Outcome::validation(Detail::enumerate(
            "must be one of ",
            members.iter().map(|m| m.to_text().into_owned()),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Registry, TypeRef};

    #[test]
    fn test_member_is_returned() {
        let r = TypeRef::new(ID).with("values", vec!["dev", "prod"]);
        let result = Registry::new().cast(&Value::from("prod"), &r).unwrap();
        assert_eq!(result, Ok(Value::from("prod")));
    }

    #[test]
    fn test_members_are_stringified() {
        let r = TypeRef::new(ID).with("values", vec![1, 2]);
        let result = Registry::new().cast(&Value::from("2"), &r).unwrap();
        assert_eq!(result, Ok(Value::Integer(2)));
    }

    #[test]
    fn test_non_member_lists_allowed_values() {
        let r = TypeRef::new(ID).with("values", vec!["dev", "prod"]);
        let failure = Registry::new()
            .cast(&Value::from("staging"), &r)
            .unwrap()
            .unwrap_err();
        assert_eq!(
            failure.details,
            vec![Detail::Validation(vec![
                Detail::text("must be one of "),
                Detail::highlight("dev"),
                Detail::text(", "),
                Detail::highlight("prod"),
            ])]
        );
    }

    #[test]
    fn test_values_option_is_required() {
        let result = Registry::new().validate(&TypeRef::new(ID));
        assert!(matches!(result, Err(TypeError::MissingOption { .. })));
    }
}
