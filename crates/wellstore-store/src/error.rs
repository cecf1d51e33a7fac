use thiserror::Error;
use wellstore_model::{AddressError, RangeError};
use wellstore_schema::SchemaError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("no object at {address}")]
    NotFound { address: String },

    #[error("object already exists at {address}")]
    AlreadyExists { address: String },

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
