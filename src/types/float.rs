use super::detail::Detail;
use super::error::TypeError;
use super::reference::Options;
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "float";

/// IEEE doubles written in plain decimal or exponent notation.
#[derive(Debug, Clone, Copy)]
pub struct Float;

impl Cast for Float {
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

        if let Value::Float(x) = raw {
            return Ok(Outcome::Ok(Value::Float(*x)));
        }
        let Some(text) = raw.as_text() else {
            return Ok(Outcome::Fail);
        };

        let end = numeric_prefix(text);
        if end == 0 {
            return Ok(Outcome::parsing(vec![Detail::text("not a number")]));
        }
        let rest = &text[end..];
        if !rest.is_empty() {
            return Ok(Outcome::parsing(vec![
                Detail::text("unexpected "),
                Detail::highlight(rest),
            ]));
        }

        match text.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Outcome::Ok(Value::Float(x))),
            _ => Ok(Outcome::parsing(vec![Detail::text("out of range")])),
        }
    }
}

/// Length of the longest `[+-]?digits(.digits)?([eE][+-]?digits)?` prefix,
/// or 0 when there is no leading digit.
fn numeric_prefix(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_len = digits(end);
    if int_len == 0 {
        return 0;
    }
    end += int_len;

    if bytes.get(end) == Some(&b'.') {
        let frac_len = digits(end + 1);
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_len = digits(exp);
        if exp_len > 0 {
            end = exp + exp_len;
        }
    }

    end
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
    fn test_parses_decimal_and_exponent() {
        assert_eq!(cast("1.5"), Ok(Value::Float(1.5)));
        assert_eq!(cast("-2"), Ok(Value::Float(-2.0)));
        assert_eq!(cast("3e2"), Ok(Value::Float(300.0)));
    }

    #[test]
    fn test_leftover() {
        let failure = cast("1.5kg").unwrap_err();
        assert_eq!(
            failure.details,
            vec![Detail::Parsing(vec![
                Detail::text("unexpected "),
                Detail::highlight("kg"),
            ])]
        );
    }

    #[test]
    fn test_rejects_special_values() {
        assert!(cast("inf").is_err());
        assert!(cast("NaN").is_err());
        assert!(cast(".5").is_err());
    }
}
