//! Remote Store Module
//!
//! A `Store` that lives on the other side of an HTTP connection. It is the
//! client-side mirror of [`crate::www::DataServer`]: store calls become HTTP
//! requests, responses become store results.
//!
//! ## Core Concepts
//! - **Request builders**: One pluggable function per operation turns an `Id`
//!   into a method/URL/headers request. The wire layout is entirely up to them.
//! - **Codecs**: A marshaler, an unmarshaler and an id-list unmarshaler convert
//!   payloads and listings to and from bodies.
//! - **Failure policy**: `list` and `delete` may swallow remote failures
//!   (`FailurePolicy::Lossy`, the default) or report them (`Strict`).
//! - **Enumeration**: `for_each` is the contract's generic list-then-get walk.

pub mod client;
pub mod requests;

pub use client::{DEFAULT_TIMEOUT, FailurePolicy, RemoteCodec, RemoteStore, RemoteStoreBuilder};
pub use requests::{RemoteRequests, RequestBuilder, UrlFn, append_id_url, simple_request};
