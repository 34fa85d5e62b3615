//! Storage Module
//!
//! Defines the repository abstraction every backend satisfies and the
//! volatile in-memory backend.
//!
//! ## Core Concepts
//! - **Identifier**: `Id` is an opaque string token, unique within one store only.
//! - **Payload**: stores never interpret values; anything `Clone + Send + Sync` fits.
//! - **Contract**: `Store<V>` exposes put, get, list, for_each and delete with the
//!   same semantics regardless of where the data lives.
//! - **Backends**: `MemoryStore` keeps data in process memory. The HTTP-backed
//!   backend lives in [`crate::remote`].

pub mod memory;
pub mod repository;
pub mod types;

pub use memory::MemoryStore;
pub use repository::{Store, Visitor};
pub use types::{Id, Payload, Result, StoreError};

#[cfg(test)]
mod tests;
