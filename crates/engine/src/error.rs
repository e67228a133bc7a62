//! The module contains the errors the engine can return.
//!
//! Aggregation and rendering never fail: malformed amounts, missing
//! categories and empty histories all degrade to defined defaults. Only
//! writing to a store can go wrong:
//!
//! - [`Io`] when the backing file cannot be read or written.
//! - [`Json`] when a value cannot be serialized.
//! - [`InvalidEntry`] when an entry is rejected before being stored.
//!
//!  [`Io`]: EngineError::Io
//!  [`Json`]: EngineError::Json
//!  [`InvalidEntry`]: EngineError::InvalidEntry
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            _ => false,
        }
    }
}
