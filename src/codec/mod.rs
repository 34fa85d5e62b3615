//! Payload Codec Module
//!
//! Converts payloads to and from wire bytes for both HTTP sides of the crate:
//! the `DataServer` picks codecs per request by media type, and the
//! `RemoteStore` is configured with one marshaler/unmarshaler pair.
//!
//! ## Submodules
//! - **`types`**: Codec function types, `CodecError` and media type constants.
//! - **`text`**: `text/plain` codecs, including a shape-checking variant for
//!   dynamically typed `serde_json::Value` payloads.
//! - **`json`**: `application/json` codecs for any serde type.
//! - **`binary`**: `application/octet-stream` pass-through codecs.
//! - **`ids`**: Delimited identifier lists.
//! - **`registry`**: Media type → codec lookup table.

pub mod binary;
pub mod ids;
pub mod json;
pub mod registry;
pub mod text;
pub mod types;

pub use registry::CodecRegistry;
pub use types::{
    APPLICATION_JSON, CodecError, Decoder, Encoder, IdListDecoder, OCTET_STREAM, TEXT_PLAIN,
};
