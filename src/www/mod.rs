//! REST Data Server Module
//!
//! Exposes any [`crate::store::Store`] as an HTTP resource collection. The
//! server maps verbs to store operations, parses the item id out of the
//! path, negotiates the response encoding, and turns every failure into one
//! status code plus one diagnostic line.
//!
//! ## Request Lifecycle
//! 1. **Dispatch**: The base path is stripped and the method selects create,
//!    retrieve, update or delete. Other methods get 501.
//! 2. **Path**: The first path segment, percent-decoded, is the item id.
//! 3. **Negotiation**: `Accept` picks the encoder for reads (first registered
//!    entry wins); `Content-Type` picks the decoder for writes.
//! 4. **Store call**: Failures are classified by where they happened: a
//!    failed read is 404, a failed write is 500.
//!
//! ## Submodules
//! - **`server`**: `DataServer`, its builder and the axum glue.
//! - **`path`**: Base stripping and segment shifting.
//! - **`negotiate`**: Media type parsing and `Accept` matching.
//! - **`ids`**: Identifier generators for created items.
//! - **`logger`**: Sinks for the per-request error lines.
//! - **`errors`**: `ServeError` and its status mapping.

pub mod errors;
pub mod ids;
pub mod logger;
pub mod negotiate;
pub mod path;
pub mod server;

pub use errors::ServeError;
pub use ids::{IdGenerator, incrementing_ids, uuid_ids};
pub use logger::{DiscardSink, LogSink, MemorySink, TracingSink};
pub use server::{DEFAULT_MAX_BODY_BYTES, DataServer, DataServerBuilder, ServerConfig};
