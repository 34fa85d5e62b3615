//! Media type parsing and `Accept` negotiation.

use crate::codec::{CodecRegistry, Encoder};

/// Extracts the lowercased `type/subtype` of a header entry, ignoring
/// parameters. Returns `None` for entries that are not media types.
pub fn media_type(entry: &str) -> Option<String> {
    let essence = entry.split(';').next()?.trim();
    let (kind, subtype) = essence.split_once('/')?;

    let valid = |part: &str| {
        !part.is_empty() && !part.contains(|c: char| c.is_whitespace() || c == '/')
    };
    if !valid(kind) || !valid(subtype) {
        return None;
    }

    Some(essence.to_ascii_lowercase())
}

/// Picks the first `Accept` entry, in the order the client listed them, that
/// has a registered encoder.
///
/// Quality values are ignored and wildcards only match an encoder registered
/// under the literal wildcard string.
pub fn acceptable<'a, V>(
    accept: &str,
    codecs: &'a CodecRegistry<V>,
) -> Option<(String, &'a Encoder<V>)>
where
    V: crate::store::Payload,
{
    accept
        .split(',')
        .filter_map(media_type)
        .find_map(|media| codecs.encoder(&media).map(|encoder| (media, encoder)))
}
