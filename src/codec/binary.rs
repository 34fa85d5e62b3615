//! `application/octet-stream` codecs: bytes in, bytes out.

use std::sync::Arc;

use super::types::{CodecError, Decoder, Encoder};
use crate::store::Payload;

pub fn binary_encoder<V>() -> Encoder<V>
where
    V: Payload + AsRef<[u8]>,
{
    Arc::new(|payload: &V| Ok::<_, CodecError>(payload.as_ref().to_vec()))
}

pub fn binary_decoder<V>() -> Decoder<V>
where
    V: Payload + From<Vec<u8>>,
{
    Arc::new(|bytes: &[u8]| Ok::<_, CodecError>(V::from(bytes.to_vec())))
}
