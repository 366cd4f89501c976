//! File-based store source.

use std::path::{Path, PathBuf};

use super::source::{toml_to_value, StoreEntry, StoreSource};
use super::StoreError;

/// A store source that loads a flat TOML table of `NAME = value` pairs.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl StoreSource for FileSource {
    fn entries(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let Some(table) = load_store_file(&self.path, self.required)? else {
            return Ok(vec![]);
        };
        Ok(table
            .into_iter()
            .map(|(name, value)| StoreEntry::new(name, toml_to_value(value)))
            .collect())
    }
}

/// Loads and parses a TOML store file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_store_file(path: &Path, required: bool) -> Result<Option<toml::Table>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| StoreError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(StoreError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(StoreError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
