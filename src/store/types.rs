use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::types::CodecError;

/// Opaque identifier addressing a single item within one store.
///
/// Identifiers are only unique per store. Two stores may hold the same `Id`
/// with unrelated payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(pub String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Marker for values a store can hold.
///
/// Stores never look inside a payload; they only move it around as a unit.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + Send + Sync + 'static {}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by `Store` implementations.
///
/// Callers are not expected to branch on the variant beyond `NotFound`; every
/// variant renders as a single diagnostic line.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Store object not found: {0}")]
    NotFound(Id),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Failed response from server: {status} ({context})")]
    Status { status: String, context: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("{0}")]
    Visitor(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
