use ::url::ParseError;

use super::detail::Detail;
use super::error::TypeError;
use super::reference::Options;
use super::registry::{Cast, Caster, Outcome};
use super::value::Value;

pub const ID: &str = "url";

/// Absolute URLs with a scheme, a host and a well-formed query string.
#[derive(Debug, Clone, Copy)]
pub struct Url;

impl Cast for Url {
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

        let url = match ::url::Url::parse(text) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => return Ok(missing("scheme")),
            Err(ParseError::EmptyHost) => return Ok(missing("host")),
            Err(e) => return Ok(Outcome::parsing(vec![Detail::text(e.to_string())])),
        };

        if url.host_str().map_or(true, str::is_empty) {
            return Ok(missing("host"));
        }
        if let Some(query) = url.query() {
            if let Some(pair) = malformed_pair(query) {
                return Ok(Outcome::parsing(vec![
                    Detail::text("malformed query pair "),
                    Detail::highlight(pair),
                ]));
            }
        }
        Ok(Outcome::Ok(Value::String(text.to_string())))
    }
}

fn missing(part: &str) -> Outcome {
    Outcome::validation(vec![
        Detail::text("missing a "),
        Detail::highlight(part),
    ])
}

/// First `&`-separated pair with an empty key or a broken `%` escape.
fn malformed_pair(query: &str) -> Option<&str> {
    query.split('&').filter(|p| !p.is_empty()).find(|pair| {
        let key = pair.split_once('=').map_or(*pair, |(k, _)| k);
        key.is_empty() || !valid_escapes(pair)
    })
}

fn valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
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

    fn message(result: CastResult) -> String {
        result.unwrap_err().details[0].to_string()
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(message(cast("localhost")), "missing a scheme");
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(message(cast("https://")), "missing a host");
        assert_eq!(message(cast("mailto:ops")), "missing a host");
    }

    #[test]
    fn test_query_string() {
        assert_eq!(
            cast("https://example.com?key=value"),
            Ok(Value::from("https://example.com?key=value"))
        );
        let failure = cast("https://example.com?=value").unwrap_err();
        assert!(failure.is_parsing());
        let failure = cast("https://example.com?a=%zz").unwrap_err();
        assert!(failure.is_parsing());
    }
}
