use super::source::{StoreEntry, StoreSource};
use super::StoreError;
use crate::types::Value;

/// Reads the process environment.
///
/// With a non-empty prefix only variables starting with it are kept, and
/// the prefix is stripped from their names. Values stay raw strings; casting
/// is the schema's job. Values that are not valid unicode are kept as bytes.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl StoreSource for EnvSource {
    fn entries(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let mut entries = Vec::new();

        for (key, value) in std::env::vars_os() {
            let Some(key) = key.to_str() else {
                continue;
            };
            let Some(name) = key.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let value = match value.into_string() {
                Ok(text) => Value::String(text),
                Err(raw) => Value::Bytes(raw.into_encoded_bytes()),
            };
            entries.push(StoreEntry::new(name, value));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_stripped() {
        std::env::set_var("ENVSCHEMA_TEST_PREFIX_HOST", "localhost");
        let entries = EnvSource::new("ENVSCHEMA_TEST_PREFIX_").entries().unwrap();
        std::env::remove_var("ENVSCHEMA_TEST_PREFIX_HOST");

        assert_eq!(
            entries,
            vec![StoreEntry::new("HOST", Value::from("localhost"))]
        );
    }

    #[test]
    fn test_no_prefix_reads_everything() {
        std::env::set_var("ENVSCHEMA_TEST_UNPREFIXED", "1");
        let entries = EnvSource::default().entries().unwrap();
        std::env::remove_var("ENVSCHEMA_TEST_UNPREFIXED");

        assert!(entries
            .iter()
            .any(|e| e.name == "ENVSCHEMA_TEST_UNPREFIXED" && e.value == Value::from("1")));
    }
}
