//! Resolution context: the dimensions a schema is evaluated against.

use std::collections::BTreeMap;

/// Flat mapping of context dimensions (environment, deployment target, ...)
/// to their values.
///
/// Supplied once per resolution cycle and never mutated by resolution.
///
/// ## Example
///
/// ```
/// use envschema::Context;
///
/// let ctx = Context::new().with("env", "prod").with("region", "eu");
/// assert_eq!(ctx.get("env"), Some("prod"));
/// assert_eq!(ctx.get("tier"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    dimensions: BTreeMap<String, String>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a dimension, replacing any previous value.
    #[must_use]
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(dimension.into(), value.into());
        self
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.dimensions.get(dimension).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dimensions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            dimensions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
