//! `application/json` codecs backed by serde_json.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::types::{CodecError, Decoder, Encoder};
use crate::store::Payload;

pub fn json_encoder<V>() -> Encoder<V>
where
    V: Payload + Serialize,
{
    Arc::new(|payload: &V| {
        serde_json::to_vec(payload).map_err(|e| CodecError::TypeMismatch(e.to_string()))
    })
}

pub fn json_decoder<V>() -> Decoder<V>
where
    V: Payload + DeserializeOwned,
{
    Arc::new(|bytes: &[u8]| {
        serde_json::from_slice::<V>(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
    })
}
