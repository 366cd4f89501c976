//! Type references and their options.

use std::collections::BTreeMap;
use std::fmt;

use super::error::TypeError;
use super::value::Value;

/// Option value attached to a type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    List(Vec<Value>),
    Type(Box<TypeRef>),
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<TypeRef> for OptionValue {
    fn from(type_ref: TypeRef) -> Self {
        OptionValue::Type(Box::new(type_ref))
    }
}

impl<T: Into<Value>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Options passed to a type implementation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options(BTreeMap<String, OptionValue>);

static NO_OPTIONS: Options = Options(BTreeMap::new());

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fails on the first key not listed in `allowed`.
    pub fn ensure_known(&self, type_id: &str, allowed: &[&str]) -> Result<(), TypeError> {
        match self.0.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(option) => Err(TypeError::UnknownOption {
                type_id: type_id.to_string(),
                option: option.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn text(&self, type_id: &str, key: &str) -> Result<Option<&str>, TypeError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(OptionValue::Text(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(type_id, key, "expected text")),
        }
    }

    pub fn list(&self, type_id: &str, key: &str) -> Result<Option<&[Value]>, TypeError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(OptionValue::List(items)) => Ok(Some(items)),
            Some(_) => Err(invalid(type_id, key, "expected a list")),
        }
    }

    /// A nested type reference. Text names a bare type.
    pub fn type_ref(&self, type_id: &str, key: &str) -> Result<Option<TypeRef>, TypeError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(OptionValue::Type(inner)) => Ok(Some((**inner).clone())),
            Some(OptionValue::Text(id)) => Ok(Some(TypeRef::new(id.as_str()))),
            Some(OptionValue::List(_)) => Err(invalid(type_id, key, "expected a type reference")),
        }
    }
}

pub(crate) fn invalid(type_id: &str, key: &str, reason: impl Into<String>) -> TypeError {
    TypeError::InvalidOption {
        type_id: type_id.to_string(),
        option: key.to_string(),
        reason: reason.into(),
    }
}

/// Names a casting implementation, optionally with options.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Bare(String),
    WithOptions(String, Options),
}

impl TypeRef {
    pub fn new(id: impl Into<String>) -> Self {
        TypeRef::Bare(id.into())
    }

    /// Adds an option, turning a bare reference into a paired one.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let (id, mut options) = match self {
            TypeRef::Bare(id) => (id, Options::new()),
            TypeRef::WithOptions(id, options) => (id, options),
        };
        options.insert(key, value);
        TypeRef::WithOptions(id, options)
    }

    pub fn id(&self) -> &str {
        match self {
            TypeRef::Bare(id) | TypeRef::WithOptions(id, _) => id,
        }
    }

    /// Options for dispatch; empty for bare references.
    pub fn options(&self) -> &Options {
        match self {
            TypeRef::Bare(_) => &NO_OPTIONS,
            TypeRef::WithOptions(_, options) => options,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<&str> for TypeRef {
    fn from(id: &str) -> Self {
        TypeRef::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_reference_has_no_options() {
        let r = TypeRef::new("integer");
        assert_eq!(r.id(), "integer");
        assert!(r.options().is_empty());
    }

    #[test]
    fn test_with_builds_paired_reference() {
        let r = TypeRef::new("csv").with("of", TypeRef::new("integer"));
        assert_eq!(r.id(), "csv");
        let inner = r.options().type_ref("csv", "of").unwrap().unwrap();
        assert_eq!(inner, TypeRef::new("integer"));
    }

    #[test]
    fn test_text_option_names_bare_type() {
        let r = TypeRef::new("csv").with("of", "float");
        let inner = r.options().type_ref("csv", "of").unwrap();
        assert_eq!(inner, Some(TypeRef::new("float")));
    }

    #[test]
    fn test_ensure_known_rejects_unlisted_keys() {
        let r = TypeRef::new("integer").with("sign", "positive");
        let err = r.options().ensure_known("integer", &["scope"]).unwrap_err();
        assert!(matches!(err, TypeError::UnknownOption { option, .. } if option == "sign"));
    }

    #[test]
    fn test_wrong_option_shape() {
        let r = TypeRef::new("enum").with("values", "a");
        assert!(r.options().list("enum", "values").is_err());
    }
}
