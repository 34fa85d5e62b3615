//! The repository contract shared by every backend.

use async_trait::async_trait;

use super::types::{Id, Payload, Result};

/// Callback invoked once per `(id, payload)` pair by [`Store::for_each`].
///
/// Returning an error stops the visit; the same error is handed back to the
/// caller of `for_each`.
pub type Visitor<'a, V> = dyn FnMut(&Id, &V) -> Result<()> + Send + 'a;

/// Generic repository over identifier-addressed payloads.
///
/// Backends must behave identically through this interface:
/// - `put` inserts or overwrites; afterwards `id` resolves to `payload`.
/// - `get` returns the latest payload, or `StoreError::NotFound` for an absent id.
/// - `list` returns every live id exactly once, in no particular order.
/// - `for_each` visits every pair once and stops at the first visitor error.
/// - `delete` removes the id; deleting an absent id is not an error.
#[async_trait]
pub trait Store<V: Payload>: Send + Sync {
    async fn put(&self, id: Id, payload: V) -> Result<()>;

    async fn get(&self, id: &Id) -> Result<V>;

    async fn list(&self) -> Result<Vec<Id>>;

    /// Enumerates via `list`, then fetches each payload with `get`.
    ///
    /// A failing `get` aborts the whole visit with that error. Backends that can
    /// iterate their contents directly should override this.
    async fn for_each(&self, visitor: &mut Visitor<'_, V>) -> Result<()> {
        for id in self.list().await? {
            let payload = self.get(&id).await?;
            visitor(&id, &payload)?;
        }
        Ok(())
    }

    async fn delete(&self, id: &Id) -> Result<()>;
}
