//! Delimiter-separated identifier lists, as served by a listing `DataServer`.

use std::sync::Arc;

use super::types::{CodecError, IdListDecoder};
use crate::store::Id;

/// Splits a UTF-8 body on `sep`. Empty segments (an empty body, a trailing
/// delimiter) are dropped rather than turned into empty identifiers.
pub fn delimited_ids(sep: &str) -> IdListDecoder {
    let sep = sep.to_string();
    Arc::new(move |bytes: &[u8]| {
        let body =
            std::str::from_utf8(bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
        Ok(body
            .trim_end_matches(['\r', '\n'])
            .split(sep.as_str())
            .filter(|segment| !segment.is_empty())
            .map(Id::from)
            .collect())
    })
}

pub fn join_ids(ids: &[Id], sep: &str) -> Vec<u8> {
    ids.iter()
        .map(Id::as_str)
        .collect::<Vec<_>>()
        .join(sep)
        .into_bytes()
}
