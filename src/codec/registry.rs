//! Media Type Codec Registry
//!
//! Maps media type tokens (e.g. "text/plain") to the encoder and decoder that
//! handle them. The `DataServer` resolves entries from it at request time using
//! the client's `Accept` and `Content-Type` headers.
//!
//! A registry is assembled once, before the server is built, and only read
//! afterwards.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::binary::{binary_decoder, binary_encoder};
use super::json::{json_decoder, json_encoder};
use super::text::{text_decoder, text_encoder};
use super::types::{APPLICATION_JSON, Decoder, Encoder, OCTET_STREAM, TEXT_PLAIN};
use crate::store::Payload;

/// Registry holding the per-media-type codecs for one payload type.
pub struct CodecRegistry<V> {
    encoders: HashMap<String, Encoder<V>>,
    decoders: HashMap<String, Decoder<V>>,
}

impl<V: Payload> CodecRegistry<V> {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            encoders: HashMap::new(),
            decoders: HashMap::new(),
        }
    }

    /// Registers an encoder under a media type, replacing any previous one.
    ///
    /// Media types are matched case-insensitively, so the key is stored lowercased.
    pub fn register_encoder(&mut self, media_type: &str, encoder: Encoder<V>) {
        self.encoders.insert(media_type.to_ascii_lowercase(), encoder);
        tracing::debug!("Registered encoder: {}", media_type);
    }

    /// Registers a decoder under a media type, replacing any previous one.
    pub fn register_decoder(&mut self, media_type: &str, decoder: Decoder<V>) {
        self.decoders.insert(media_type.to_ascii_lowercase(), decoder);
        tracing::debug!("Registered decoder: {}", media_type);
    }

    pub fn with_encoder(mut self, media_type: &str, encoder: Encoder<V>) -> Self {
        self.register_encoder(media_type, encoder);
        self
    }

    pub fn with_decoder(mut self, media_type: &str, decoder: Decoder<V>) -> Self {
        self.register_decoder(media_type, decoder);
        self
    }

    /// Adds every codec of `other`; on a clash `other` wins.
    pub fn merge(mut self, other: Self) -> Self {
        self.encoders.extend(other.encoders);
        self.decoders.extend(other.decoders);
        self
    }

    /// Looks up the encoder for an exact (already parameter-stripped) media type.
    pub fn encoder(&self, media_type: &str) -> Option<&Encoder<V>> {
        self.encoders.get(media_type)
    }

    pub fn decoder(&self, media_type: &str) -> Option<&Decoder<V>> {
        self.decoders.get(media_type)
    }

    /// Returns the media types that can be produced, sorted.
    pub fn encoder_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.encoders.keys().cloned().collect();
        types.sort();
        types
    }

    /// Returns the media types that can be consumed, sorted.
    pub fn decoder_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.decoders.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn has_encoder(&self, media_type: &str) -> bool {
        self.encoders.contains_key(media_type)
    }

    pub fn has_decoder(&self, media_type: &str) -> bool {
        self.decoders.contains_key(media_type)
    }
}

impl<V> CodecRegistry<V>
where
    V: Payload + AsRef<str> + From<String>,
{
    /// `text/plain` in both directions.
    pub fn text() -> Self {
        Self::new()
            .with_encoder(TEXT_PLAIN, text_encoder())
            .with_decoder(TEXT_PLAIN, text_decoder())
    }
}

impl<V> CodecRegistry<V>
where
    V: Payload + Serialize + DeserializeOwned,
{
    /// `application/json` in both directions.
    pub fn json() -> Self {
        Self::new()
            .with_encoder(APPLICATION_JSON, json_encoder())
            .with_decoder(APPLICATION_JSON, json_decoder())
    }
}

impl<V> CodecRegistry<V>
where
    V: Payload + AsRef<[u8]> + From<Vec<u8>>,
{
    /// `application/octet-stream` in both directions.
    pub fn binary() -> Self {
        Self::new()
            .with_encoder(OCTET_STREAM, binary_encoder())
            .with_decoder(OCTET_STREAM, binary_decoder())
    }
}

impl<V: Payload> Default for CodecRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for CodecRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            encoders: self.encoders.clone(),
            decoders: self.decoders.clone(),
        }
    }
}
