//! Pluggable Object Store Library
//!
//! This library crate defines a small key/value storage abstraction and two
//! ways of putting it on the network. It serves as the foundation for the
//! binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled parts:
//!
//! - **`store`**: The `Store` contract (put, get, list, visit, delete) over opaque
//!   payloads addressed by `Id`, plus a concurrent in-memory implementation.
//! - **`codec`**: Byte conversions between payloads and request/response bodies,
//!   keyed by media type (`text/plain`, `application/json`, raw bytes).
//! - **`www`**: The `DataServer`, which exposes any `Store` as a REST resource
//!   collection with content negotiation.
//! - **`remote`**: The `RemoteStore`, a `Store` whose operations are HTTP round
//!   trips to a peer such as a `DataServer`.

pub mod codec;
pub mod remote;
pub mod store;
pub mod www;
