use std::path::Path;

use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use super::source::StoreSource;
use super::{Store, StoreError};

/// Builder layering several sources into one [`Store`] snapshot.
///
/// Sources are applied in registration order, so later sources override
/// earlier ones name by name.
///
/// ## Example
///
/// ```no_run
/// use envschema::Store;
///
/// // file defaults -> environment overrides
/// let store = Store::builder()
///     .with_file("config/defaults.toml", false)
///     .with_env("MYAPP_")
///     .build()?;
/// # Ok::<(), envschema::StoreError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct StoreBuilder {
    sources: Vec<Box<dyn StoreSource>>,
}

impl StoreBuilder {
    /// Adds a flat TOML file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds the process environment, keeping only names starting with
    /// `prefix` (stripped). An empty prefix keeps everything.
    pub fn with_env(self, prefix: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix))
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl StoreSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Reads every source and merges them into a snapshot.
    pub fn build(self) -> Result<Store, StoreError> {
        let mut store = Store::new();
        for source in &self.sources {
            let entries = source.entries()?;
            debug!(?source, entries = entries.len(), "loaded store source");
            for entry in entries {
                store.insert(entry.name, entry.value);
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreEntry;
    use crate::types::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug)]
    struct Fixed(Vec<StoreEntry>);

    impl StoreSource for Fixed {
        fn entries(&self) -> Result<Vec<StoreEntry>, StoreError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_later_sources_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "HOST = \"file\"\nPORT = \"80\"").unwrap();

        let store = Store::builder()
            .with_file(file.path(), true)
            .with_source(Fixed(vec![StoreEntry::new("HOST", "custom")]))
            .build()
            .unwrap();

        assert_eq!(store.get("HOST"), Some(&Value::from("custom")));
        assert_eq!(store.get("PORT"), Some(&Value::from("80")));
    }

    #[test]
    fn test_required_file_error_propagates() {
        let result = Store::builder()
            .with_file("/nonexistent/store.toml", true)
            .build();
        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }

    #[test]
    fn test_env_layer() {
        std::env::set_var("ENVSCHEMA_BUILDER_TEST_TOKEN", "abc");
        let store = Store::builder()
            .with_source(Fixed(vec![StoreEntry::new("TOKEN", "default")]))
            .with_env("ENVSCHEMA_BUILDER_TEST_")
            .build()
            .unwrap();
        std::env::remove_var("ENVSCHEMA_BUILDER_TEST_TOKEN");

        assert_eq!(store.get("TOKEN"), Some(&Value::from("abc")));
    }
}
