use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;

use super::detail::Detail;
use super::error::TypeError;
use super::reference::{Options, TypeRef};
use super::registry::{Cast, Caster, Outcome};
use super::string;
use super::value::Value;

pub const ID: &str = "base64";

fn inner(options: &Options) -> Result<TypeRef, TypeError> {
    options.ensure_known(ID, &["of"])?;
    Ok(options
        .type_ref(ID, "of")?
        .unwrap_or_else(|| TypeRef::new(string::ID)))
}

/// Standard base64, decoded and then cast through `of` (strings by default).
///
/// Inner failures pass through with their own details; the decoded payload
/// is a single value, not a collection.
#[derive(Debug, Clone, Copy)]
pub struct Base64;

impl Cast for Base64 {
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

        let decoded = match STANDARD.decode(text.trim()) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(Outcome::parsing(vec![Detail::text(e.to_string())])),
        };

        Ok(match caster.cast(&Value::Bytes(decoded), &of)? {
            Ok(value) => Outcome::Ok(value),
            Err(failure) => Outcome::Err(failure.details),
        })
    }
}
