//! `text/plain` codecs.

use serde_json::Value;
use std::sync::Arc;

use super::types::{CodecError, Decoder, Encoder};
use crate::store::Payload;

pub fn text_encoder<V>() -> Encoder<V>
where
    V: Payload + AsRef<str>,
{
    Arc::new(|payload: &V| Ok::<_, CodecError>(payload.as_ref().as_bytes().to_vec()))
}

/// Rejects bodies that are not valid UTF-8.
pub fn text_decoder<V>() -> Decoder<V>
where
    V: Payload + From<String>,
{
    Arc::new(|bytes: &[u8]| {
        String::from_utf8(bytes.to_vec())
            .map(V::from)
            .map_err(|e| CodecError::Malformed(e.to_string()))
    })
}

/// Text encoder for dynamically shaped payloads.
///
/// Only `Value::String` can be written as plain text; any other shape is a
/// `TypeMismatch`.
pub fn text_value_encoder() -> Encoder<Value> {
    Arc::new(|payload: &Value| match payload {
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        other => Err(CodecError::TypeMismatch(format!(
            "expected the payload to be a string, got {}",
            value_kind(other)
        ))),
    })
}

pub fn text_value_decoder() -> Decoder<Value> {
    Arc::new(|bytes: &[u8]| {
        String::from_utf8(bytes.to_vec())
            .map(Value::String)
            .map_err(|e| CodecError::Malformed(e.to_string()))
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
