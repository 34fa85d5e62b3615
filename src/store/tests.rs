//! Storage Module Tests
//!
//! Validates the repository contract against the in-memory backend.
//!
//! ## Test Scopes
//! - **Put/Get**: Stored payloads come back unchanged; overwrites replace.
//! - **Delete**: Removal is idempotent.
//! - **Enumeration**: `list` and `for_each` see every item exactly once, and
//!   `for_each` stops at the first visitor error.
//! - **Snapshots**: Mutations during a visit do not disturb it, and copies
//!   taken under concurrent writes match a state the store actually had.
//!
//! *Note: The HTTP-backed store is exercised in `remote::tests`.*

#[cfg(test)]
mod tests {
    use crate::store::{Id, MemoryStore, Store, StoreError};
    use serde::{Deserialize, Serialize};
    use std::collections::HashSet;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestBook {
        title: String,
        author: String,
    }

    // ============================================================
    // ID TESTS
    // ============================================================

    #[test]
    fn test_id_equality_and_display() {
        let id1 = Id::from("book-1");
        let id2 = Id::new("book-1".to_string());
        let id3 = Id::from("book-2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert!(id1 < id3);
        assert_eq!(id1.to_string(), "book-1");
        assert!(Id::from("").is_empty());
    }

    // ============================================================
    // PUT / GET
    // ============================================================

    #[tokio::test]
    async fn test_put_then_get_returns_payload() {
        let store = MemoryStore::new();

        store
            .put(Id::from("1"), "Hello World!".to_string())
            .await
            .unwrap();

        let retrieved = store.get(&Id::from("1")).await.unwrap();
        assert_eq!(retrieved, "Hello World!");
    }

    #[tokio::test]
    async fn test_put_then_get_struct_payload() {
        let store = MemoryStore::new();
        let book = TestBook {
            title: "Rust Programming".to_string(),
            author: "Steve".to_string(),
        };

        store.put(Id::from("book-001"), book.clone()).await.unwrap();

        assert_eq!(store.get(&Id::from("book-001")).await.unwrap(), book);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store: MemoryStore<String> = MemoryStore::new();

        let err = store.get(&Id::from("nonexistent")).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing() {
        let store = MemoryStore::new();
        let id = Id::from("book-001");

        store.put(id.clone(), "Original".to_string()).await.unwrap();
        store.put(id.clone(), "Updated".to_string()).await.unwrap();

        assert_eq!(store.get(&id).await.unwrap(), "Updated");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.put(Id::from("shared"), 7u32).await.unwrap();

        assert_eq!(other.get(&Id::from("shared")).await.unwrap(), 7);
    }

    // ============================================================
    // DELETE
    // ============================================================

    #[tokio::test]
    async fn test_delete_removes_item() {
        let store = MemoryStore::new();
        let id = Id::from("gone");

        store.put(id.clone(), "bye".to_string()).await.unwrap();
        store.delete(&id).await.unwrap();

        assert!(store.get(&id).await.unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = Id::from("twice");

        store.put(id.clone(), "x".to_string()).await.unwrap();

        assert!(store.delete(&id).await.is_ok());
        assert!(store.delete(&id).await.is_ok());
        assert!(store.delete(&Id::from("never-stored")).await.is_ok());
    }

    // ============================================================
    // LIST / FOR_EACH
    // ============================================================

    #[tokio::test]
    async fn test_list_contains_each_id_once() {
        let store = MemoryStore::new();

        store.put(Id::from("id1"), "a".to_string()).await.unwrap();
        store.put(Id::from("id2"), "b".to_string()).await.unwrap();
        store.put(Id::from("id2"), "c".to_string()).await.unwrap();

        let mut ids = store.list().await.unwrap();
        ids.sort();

        assert_eq!(ids, vec![Id::from("id1"), Id::from("id2")]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let store: MemoryStore<String> = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_for_each_visits_every_pair_once() {
        let store = MemoryStore::new();
        for i in 0..100 {
            store
                .put(Id::new(format!("book-{:03}", i)), format!("Title {}", i))
                .await
                .unwrap();
        }

        let mut seen = HashSet::new();
        store
            .for_each(&mut |id, title| {
                let n = id.as_str().trim_start_matches("book-").parse::<u32>().unwrap();
                assert_eq!(title, &format!("Title {}", n));
                assert!(seen.insert(id.clone()), "visited {} twice", id);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(seen.len(), 100);
    }

    #[tokio::test]
    async fn test_for_each_stops_at_first_visitor_error() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .put(Id::new(i.to_string()), i.to_string())
                .await
                .unwrap();
        }

        let mut calls = 0;
        let result = store
            .for_each(&mut |_, _| {
                calls += 1;
                if calls == 2 {
                    return Err(StoreError::Visitor("stop here".to_string()));
                }
                Ok(())
            })
            .await;

        match result {
            Err(StoreError::Visitor(msg)) => assert_eq!(msg, "stop here"),
            other => panic!("expected the visitor error, got {:?}", other),
        }
        assert_eq!(calls, 2, "visitor must not be called after it fails");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_for_each_visitor_can_mutate_store() {
        let store = MemoryStore::new();
        store.put(Id::from("a"), 1u32).await.unwrap();
        store.put(Id::from("b"), 2u32).await.unwrap();

        let visiting = store.clone();
        let writer = store.clone();
        let visited = tokio::spawn(async move {
            let mut visited = 0;
            visiting
                .for_each(&mut |id, value| {
                    visited += 1;
                    let copy = Id::new(format!("{}-copy", id));
                    let value = *value * 10;
                    // Writes go straight to the shared map; the visit runs on a copy.
                    tokio::task::block_in_place(|| {
                        tokio::runtime::Handle::current().block_on(writer.put(copy, value))
                    })
                })
                .await
                .unwrap();
            visited
        })
        .await
        .unwrap();

        assert_eq!(visited, 2);
        assert_eq!(store.len(), 4);
        assert_eq!(store.get(&Id::from("a-copy")).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_list_is_point_in_time() {
        let store = MemoryStore::new();
        store.put(Id::from("before"), 1u8).await.unwrap();

        let ids = store.list().await.unwrap();
        store.put(Id::from("after"), 2u8).await.unwrap();

        assert_eq!(ids, vec![Id::from("before")]);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    /// A sequential writer puts k0, k1, ... in order, so every state the store
    /// ever passes through is a prefix of that sequence.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_copies_never_mix_states_under_concurrent_writes() {
        const WRITES: usize = 2000;

        fn assert_prefix(ids: &HashSet<Id>) {
            for i in 0..ids.len() {
                assert!(
                    ids.contains(&Id::new(format!("k{}", i))),
                    "saw {} ids but k{} is missing",
                    ids.len(),
                    i
                );
            }
        }

        let store = MemoryStore::new();
        let writer = store.clone();
        let writes = tokio::spawn(async move {
            for i in 0..WRITES {
                writer.put(Id::new(format!("k{}", i)), i).await.unwrap();
            }
        });

        loop {
            let listed: HashSet<Id> = store.list().await.unwrap().into_iter().collect();
            assert_prefix(&listed);

            let mut visited = HashSet::new();
            store
                .for_each(&mut |id, _| {
                    visited.insert(id.clone());
                    Ok(())
                })
                .await
                .unwrap();
            assert_prefix(&visited);

            if writes.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        writes.await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), WRITES);
    }

    // ============================================================
    // DEFAULT FOR_EACH (list + get)
    // ============================================================

    /// Store that only implements the required operations, so `for_each`
    /// falls back to the provided list-then-get implementation.
    struct ListGetOnly {
        inner: MemoryStore<String>,
        broken: Option<Id>,
    }

    #[async_trait::async_trait]
    impl Store<String> for ListGetOnly {
        async fn put(&self, id: Id, payload: String) -> crate::store::Result<()> {
            self.inner.put(id, payload).await
        }

        async fn get(&self, id: &Id) -> crate::store::Result<String> {
            if self.broken.as_ref() == Some(id) {
                return Err(StoreError::Backend("disk on fire".to_string()));
            }
            self.inner.get(id).await
        }

        async fn list(&self) -> crate::store::Result<Vec<Id>> {
            self.inner.list().await
        }

        async fn delete(&self, id: &Id) -> crate::store::Result<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_default_for_each_uses_list_and_get() {
        let store = ListGetOnly {
            inner: MemoryStore::new(),
            broken: None,
        };
        store.put(Id::from("x"), "1".to_string()).await.unwrap();
        store.put(Id::from("y"), "2".to_string()).await.unwrap();

        let mut pairs = Vec::new();
        store
            .for_each(&mut |id, payload| {
                pairs.push((id.clone(), payload.clone()));
                Ok(())
            })
            .await
            .unwrap();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                (Id::from("x"), "1".to_string()),
                (Id::from("y"), "2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_default_for_each_aborts_on_get_failure() {
        let store = ListGetOnly {
            inner: MemoryStore::new(),
            broken: Some(Id::from("bad")),
        };
        store.put(Id::from("bad"), "?".to_string()).await.unwrap();

        let mut calls = 0;
        let err = store
            .for_each(&mut |_, _| {
                calls += 1;
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(calls, 0);
    }
}
