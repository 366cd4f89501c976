use crate::schema::SchemaError;
use crate::store::StoreError;
use crate::types::TypeError;
use thiserror::Error;

/// Top-level error type for the envschema library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
