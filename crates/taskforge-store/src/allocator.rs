//! Identifier allocator
//!
//! Allocation is read-then-conditional-write: read the current maximum
//! suffix for the class, increment, and let the caller persist the id
//! together with the record insert. The store's uniqueness constraint on
//! the id is the only concurrency guard; when two allocations race, the
//! loser's insert comes back Conflict and the allocation is retried with a
//! freshly read maximum, up to a bounded count. Identifiers are never
//! reused: deletions do not lower the observed maximum of surviving
//! records, and the counter only moves forward.

use crate::error::{StoreError, StoreResult};
use crate::traits::IdSequenceStore;
use std::future::Future;
use taskforge_types::EntityClass;

/// Retry bound for a single allocation. Exhaustion fails only the one
/// request that hit it.
pub const MAX_ID_RETRIES: usize = 5;

/// Next candidate identifier for the class: `<Prefix>-00001` for an empty
/// collection, otherwise max + 1.
pub async fn next_id<S>(store: &S, class: EntityClass) -> StoreResult<String>
where
    S: IdSequenceStore + ?Sized,
{
    let max = store.max_id_number(class).await?;
    Ok(class.format_id(max.unwrap_or(0) + 1))
}

/// Allocate an identifier and run the caller's insert with it, retrying on
/// uniqueness conflicts.
///
/// `insert` receives the candidate id and must persist the record in one
/// store call so the id and the record land together. Non-conflict errors
/// abort immediately.
pub async fn allocate_and_insert<S, F, Fut>(
    store: &S,
    class: EntityClass,
    mut insert: F,
) -> StoreResult<String>
where
    S: IdSequenceStore + ?Sized,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = StoreResult<()>>,
{
    for attempt in 1..=MAX_ID_RETRIES {
        let candidate = next_id(store, class).await?;
        match insert(candidate.clone()).await {
            Ok(()) => return Ok(candidate),
            Err(err) if err.is_conflict() => {
                tracing::debug!(
                    class = %class,
                    %candidate,
                    attempt,
                    "id allocation lost a race, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(StoreError::Conflict(format!(
        "could not allocate a {} id after {} attempts",
        class, MAX_ID_RETRIES
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::traits::AccountStore;
    use chrono::Utc;
    use std::sync::Arc;
    use taskforge_types::{Account, AccountClass, AccountId};

    fn account(id: &str, email: &str) -> Account {
        Account {
            id: AccountId::new(id),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            contact: None,
            avatar: None,
            class: AccountClass::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_first_id_starts_at_one() {
        let store = InMemoryStore::new();
        let id = next_id(&store, EntityClass::Account).await.unwrap();
        assert_eq!(id, "User-00001");
    }

    #[tokio::test]
    async fn test_sequential_allocation() {
        let store = InMemoryStore::new();
        for expected in ["User-00001", "User-00002", "User-00003"] {
            let email = format!("{}@example.com", expected);
            let id = allocate_and_insert(&store, EntityClass::Account, |candidate| {
                let store = &store;
                let email = email.clone();
                async move { store.insert_account(account(&candidate, &email)).await }
            })
            .await
            .unwrap();
            assert_eq!(id, expected);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocation_never_duplicates() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let email = format!("user{}@example.com", i);
                allocate_and_insert(store.as_ref(), EntityClass::Account, |candidate| {
                    let store = store.clone();
                    let email = email.clone();
                    async move { store.insert_account(account(&candidate, &email)).await }
                })
                .await
            }));
        }

        let mut issued = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(id) => issued.push(id),
                // A loser may exhaust its retry budget; that fails only its
                // own request and must not corrupt anyone else's id.
                Err(err) => assert!(err.is_conflict()),
            }
        }

        let mut deduped = issued.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), issued.len(), "duplicate id issued");
        assert!(!issued.is_empty());
    }

    #[tokio::test]
    async fn test_non_conflict_error_aborts() {
        let store = InMemoryStore::new();
        let result = allocate_and_insert(&store, EntityClass::Account, |_| async {
            Err(StoreError::Unavailable("store down".into()))
        })
        .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
