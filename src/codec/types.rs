use std::sync::Arc;

use crate::store::Id;

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Turns a payload into wire bytes.
pub type Encoder<V> = Arc<dyn Fn(&V) -> Result<Vec<u8>, CodecError> + Send + Sync>;

/// Turns wire bytes back into a payload.
pub type Decoder<V> = Arc<dyn Fn(&[u8]) -> Result<V, CodecError> + Send + Sync>;

/// Parses a response body listing identifiers.
pub type IdListDecoder = Arc<dyn Fn(&[u8]) -> Result<Vec<Id>, CodecError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The payload's shape cannot be represented in the target encoding.
    #[error("payload type mismatch: {0}")]
    TypeMismatch(String),

    /// The bytes are not valid for the encoding.
    #[error("malformed input: {0}")]
    Malformed(String),
}
