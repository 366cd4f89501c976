//! Raw value stores and the sources that populate them.

mod builder;
mod env;
mod error;
mod file;
mod source;

use std::collections::BTreeMap;

pub use builder::StoreBuilder;
pub use env::EnvSource;
pub use error::StoreError;
pub use file::FileSource;
pub use source::{StoreEntry, StoreSource};

pub(crate) use source::toml_to_value;

use crate::types::Value;

/// Flat snapshot of raw values keyed by variable or alias name.
///
/// Resolution only reads a store; whoever owns it may replace or merge it
/// between resolution calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    values: BTreeMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder layering files and environment variables.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Snapshot of the whole process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::builder().with_env("").build()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Overlays `other`; its values win.
    pub fn merge(&mut self, other: Store) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let mut base: Store = [("A", "1"), ("B", "2")].into_iter().collect();
        let overlay: Store = [("B", "3"), ("C", "4")].into_iter().collect();
        base.merge(overlay);

        assert_eq!(base.len(), 3);
        assert_eq!(base.get("B"), Some(&Value::from("3")));
    }

    #[test]
    fn test_from_env_snapshot() {
        std::env::set_var("ENVSCHEMA_STORE_TEST_SNAPSHOT", "yes");
        let store = Store::from_env().unwrap();
        std::env::remove_var("ENVSCHEMA_STORE_TEST_SNAPSHOT");

        assert_eq!(
            store.get("ENVSCHEMA_STORE_TEST_SNAPSHOT"),
            Some(&Value::from("yes"))
        );
    }
}
