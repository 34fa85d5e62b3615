//! Identifier generators for items created through `POST`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::{Id, Payload};

/// Produces a fresh identifier for a newly created payload. Called exactly
/// once per successful decode of a `POST` body.
pub type IdGenerator<V> = Arc<dyn Fn(&V) -> Id + Send + Sync>;

/// `"0"`, `"1"`, `"2"`, ... shared across all requests of one server.
pub fn incrementing_ids<V: Payload>() -> IdGenerator<V> {
    let next = AtomicU64::new(0);
    Arc::new(move |_: &V| Id::new(next.fetch_add(1, Ordering::SeqCst).to_string()))
}

/// Random UUID v4 identifiers.
pub fn uuid_ids<V: Payload>() -> IdGenerator<V> {
    Arc::new(|_: &V| Id::new(uuid::Uuid::new_v4().to_string()))
}
