use std::path::PathBuf;

use thiserror::Error;

use crate::types::TypeError;

/// A structural rule a variable specification broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Rule {
    #[error("variable name must not be empty")]
    EmptyName,

    #[error("at least one group is required")]
    MissingGroups,

    #[error("group names must not be empty")]
    EmptyGroup,

    #[error("'default' and 'default_lazy' are mutually exclusive")]
    DefaultAndLazyDefault,

    #[error("'default' and 'required' are mutually exclusive")]
    DefaultAndRequired,

    #[error("alias names must not be empty")]
    EmptyAlias,

    #[error("alias '{0}' is declared more than once")]
    DuplicateAlias(String),

    #[error("alias '{0}' repeats the variable name")]
    SelfAlias(String),

    #[error("context filter '{0}' allows no values")]
    EmptyContextFilter(String),

    #[error("malformed type reference: {0}")]
    MalformedType(String),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("invalid variable '{name}': {rule}")]
    Invalid { name: String, rule: Rule },

    #[error("invalid type for variable '{name}': {source}")]
    Type {
        name: String,
        #[source]
        source: TypeError,
    },

    #[error("required schema file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read schema file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse schema file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize schema: {0}")]
    DeserializeError(#[from] toml::de::Error),
}

impl SchemaError {
    pub(crate) fn invalid(name: &str, rule: Rule) -> Self {
        SchemaError::Invalid {
            name: name.to_string(),
            rule,
        }
    }

    /// The variable the error refers to, if any.
    pub fn variable(&self) -> Option<&str> {
        match self {
            SchemaError::Invalid { name, .. } | SchemaError::Type { name, .. } => Some(name),
            _ => None,
        }
    }
}
