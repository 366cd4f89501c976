use thiserror::Error;

/// A type reference or its options are unusable.
///
/// These are programming mistakes in a schema, not bad input values, so they
/// are returned as errors instead of being recorded as cast failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeError {
    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("type '{type_id}' does not accept option '{option}'")]
    UnknownOption { type_id: String, option: String },

    #[error("type '{type_id}' requires option '{option}'")]
    MissingOption { type_id: String, option: String },

    #[error("type '{type_id}' option '{option}' is invalid: {reason}")]
    InvalidOption {
        type_id: String,
        option: String,
        reason: String,
    },

    #[error("type references nest deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
