//! Batched association loading for GraphQL relation resolvers
//!
//! Resolvers ask for one parent's relation at a time; issuing a query per
//! parent would be an N+1. `AssociationLoader` instead collects every parent
//! key requested for a relation during one scheduling window and issues a
//! single query per (parent type, policy) group, handing each caller back its
//! own slice of the results.
//!
//! Batches are keyed by `(Key::Group, Policy)`: keys for different parent
//! entity types or different access policies never share a query. Within one
//! batch a key is fetched at most once, no matter how many resolvers asked
//! for it.
//!
//! The flush boundary is a short timer tick armed by the first enqueue of a
//! batch, the same convention async-graphql's `DataLoader` uses. Everything
//! here is scoped to one GraphQL request: the loader is created when the
//! request starts and dropped with it, and a flush task that wakes up after
//! its owning request is gone issues no query at all.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

/// Default flush window for a freshly opened batch
const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(1);

/// Access-control scope applied when fetching a relation
///
/// The tag partitions batches; the row predicates it stands for live in the
/// relation fetchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Rows visible to anyone
    Public,
    /// Staff credits, restricted to approved people
    MediaStaff,
    /// Production credits, restricted to approved companies
    MediaProduction,
}

/// Errors a deferred relation load can resolve to
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The underlying fetch failed; shared by every waiter in the batch group
    #[error("relation fetch failed: {0}")]
    Fetch(Arc<sqlx::Error>),

    /// The access policy does not permit fetching this relation
    #[error("access denied for relation {0}")]
    PolicyDenied(&'static str),

    /// The owning request went away before the batch was flushed
    #[error("request ended before the relation batch resolved")]
    Cancelled,
}

/// Result of one deferred relation load
pub type LoadResult<E> = Result<Vec<E>, LoadError>;

/// Result of one batched fetch: related rows partitioned by parent key
pub type FetchResult<K, E> = Result<HashMap<K, Vec<E>>, LoadError>;

/// Parent key for a batched relation load
///
/// `Group` is the parent entity type discriminant; keys with different groups
/// are fetched by separate queries.
pub trait BatchKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    type Group: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    fn group(&self) -> Self::Group;
}

/// The generic entity-fetch interface a relation implements
///
/// One implementation per relation, backed by a single query covering all
/// `keys`. Keys missing from the returned map resolve to an empty set for
/// their callers; a fetcher handed a policy it does not serve returns
/// [`LoadError::PolicyDenied`].
pub trait RelationFetcher: Send + Sync + 'static {
    type Key: BatchKey;
    type Entity: Clone + Send + Sync + 'static;

    /// Relation name, used in logs
    const RELATION: &'static str;

    fn fetch_related(
        &self,
        policy: Policy,
        group: &<Self::Key as BatchKey>::Group,
        keys: &[Self::Key],
    ) -> impl Future<Output = FetchResult<Self::Key, Self::Entity>> + Send;
}

type GroupOf<F> = <<F as RelationFetcher>::Key as BatchKey>::Group;
type BatchId<F> = (GroupOf<F>, Policy);
type Waiter<F> = oneshot::Sender<LoadResult<<F as RelationFetcher>::Entity>>;

/// Pending parent keys for one (group, policy) pair
struct Batch<F: RelationFetcher> {
    /// Deduplicated keys in insertion order
    keys: Vec<F::Key>,
    /// Waiting resolvers per key; more than one sender means the same key
    /// was requested repeatedly within the batch lifecycle
    waiters: HashMap<F::Key, Vec<Waiter<F>>>,
}

impl<F: RelationFetcher> Batch<F> {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            waiters: HashMap::new(),
        }
    }
}

/// In-flight batches of one loader, shared with its flush tasks
struct BatchMap<F: RelationFetcher> {
    batches: HashMap<BatchId<F>, Batch<F>>,
}

/// Batched, per-request loader for one relation
///
/// Cheap to clone; clones share the same in-flight batches.
pub struct AssociationLoader<F: RelationFetcher> {
    fetcher: Arc<F>,
    state: Arc<Mutex<BatchMap<F>>>,
    delay: Duration,
}

impl<F: RelationFetcher> Clone for AssociationLoader<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
            delay: self.delay,
        }
    }
}

impl<F: RelationFetcher> AssociationLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_delay(fetcher, DEFAULT_FLUSH_DELAY)
    }

    /// Create a loader with a custom flush window
    pub fn with_delay(fetcher: F, delay: Duration) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(Mutex::new(BatchMap {
                batches: HashMap::new(),
            })),
            delay,
        }
    }

    /// Enqueue `key` into the in-flight batch for `(key.group(), policy)`
    ///
    /// Returns immediately with a future that resolves when the batch is
    /// flushed. The first enqueue of a batch arms its flush task.
    pub fn load(
        &self,
        policy: Policy,
        key: F::Key,
    ) -> impl Future<Output = LoadResult<F::Entity>> + Send {
        let (tx, rx) = oneshot::channel();
        let id: BatchId<F> = (key.group(), policy);

        let newly_opened = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let batch = state
                .batches
                .entry(id.clone())
                .or_insert_with(Batch::new);
            let newly_opened = batch.keys.is_empty();
            match batch.waiters.entry(key.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().push(tx),
                Entry::Vacant(entry) => {
                    entry.insert(vec![tx]);
                    batch.keys.push(key);
                }
            }
            newly_opened
        };

        if newly_opened {
            tokio::spawn(flush_after(
                Arc::downgrade(&self.state),
                Arc::clone(&self.fetcher),
                id,
                self.delay,
            ));
        }

        async move {
            match rx.await {
                Ok(result) => result,
                // The loader (and with it the whole request) was dropped
                // before the flush could deliver.
                Err(_) => Err(LoadError::Cancelled),
            }
        }
    }
}

/// Flush one batch after its scheduling window has elapsed
async fn flush_after<F: RelationFetcher>(
    state: Weak<Mutex<BatchMap<F>>>,
    fetcher: Arc<F>,
    id: BatchId<F>,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    // If the owning request was dropped while we slept there is nobody left
    // to deliver to, and no query is issued.
    let Some(state) = state.upgrade() else {
        return;
    };
    let batch = {
        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        state.batches.remove(&id)
    };
    let Some(batch) = batch else {
        return;
    };

    let (group, policy) = &id;
    tracing::debug!(
        relation = F::RELATION,
        ?group,
        ?policy,
        keys = batch.keys.len(),
        "flushing association batch"
    );

    match fetcher.fetch_related(*policy, group, &batch.keys).await {
        Ok(mut related) => {
            for (key, waiters) in batch.waiters {
                // Keys the fetch did not cover resolve to an empty set, not
                // an error.
                let rows = related.remove(&key).unwrap_or_default();
                for waiter in waiters {
                    let _ = waiter.send(Ok(rows.clone()));
                }
            }
        }
        Err(error) => {
            tracing::warn!(
                relation = F::RELATION,
                ?group,
                error = %error,
                "association batch fetch failed"
            );
            for waiters in batch.waiters.into_values() {
                for waiter in waiters {
                    let _ = waiter.send(Err(error.clone()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct TestKey {
        group: &'static str,
        id: i64,
    }

    fn key(group: &'static str, id: i64) -> TestKey {
        TestKey { group, id }
    }

    impl BatchKey for TestKey {
        type Group = &'static str;

        fn group(&self) -> &'static str {
            self.group
        }
    }

    /// Fetcher that records every batch it sees and returns `{id}-{n}` rows
    struct RecordingFetcher {
        calls: AtomicUsize,
        batches: Mutex<Vec<(Policy, &'static str, Vec<i64>)>>,
        rows_per_key: usize,
        fail_group: Option<&'static str>,
    }

    impl RecordingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                batches: Mutex::new(Vec::new()),
                rows_per_key: 1,
                fail_group: None,
            }
        }

        fn failing_for(group: &'static str) -> Self {
            Self {
                fail_group: Some(group),
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RelationFetcher for RecordingFetcher {
        type Key = TestKey;
        type Entity = String;

        const RELATION: &'static str = "test";

        async fn fetch_related(
            &self,
            policy: Policy,
            group: &&'static str,
            keys: &[TestKey],
        ) -> FetchResult<TestKey, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.batches
                .lock()
                .unwrap()
                .push((policy, group, keys.iter().map(|k| k.id).collect()));

            if self.fail_group == Some(*group) {
                return Err(LoadError::Fetch(Arc::new(sqlx::Error::PoolClosed)));
            }

            // Key 404 simulates a parent with no related rows at all.
            Ok(keys
                .iter()
                .filter(|k| k.id != 404)
                .map(|k| {
                    let rows = (0..self.rows_per_key)
                        .map(|n| format!("{}-{}", k.id, n))
                        .collect();
                    (*k, rows)
                })
                .collect())
        }
    }

    fn loader(fetcher: RecordingFetcher) -> AssociationLoader<RecordingFetcher> {
        AssociationLoader::with_delay(fetcher, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_one_fetch_covers_all_keys_deduplicated() {
        let loader = loader(RecordingFetcher::new());

        let (a, b, c, b_again) = tokio::join!(
            loader.load(Policy::Public, key("anime", 1)),
            loader.load(Policy::Public, key("anime", 2)),
            loader.load(Policy::Public, key("anime", 3)),
            loader.load(Policy::Public, key("anime", 2)),
        );

        assert_eq!(a.unwrap(), vec!["1-0"]);
        assert_eq!(b.unwrap(), vec!["2-0"]);
        assert_eq!(c.unwrap(), vec!["3-0"]);
        assert_eq!(b_again.unwrap(), vec!["2-0"]);

        assert_eq!(loader.fetcher.call_count(), 1);
        let batches = loader.fetcher.batches.lock().unwrap();
        assert_eq!(batches[0], (Policy::Public, "anime", vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_missing_key_resolves_to_empty_set() {
        let loader = loader(RecordingFetcher::new());

        let (hit, miss) = tokio::join!(
            loader.load(Policy::Public, key("anime", 1)),
            loader.load(Policy::Public, key("anime", 404)),
        );

        assert_eq!(hit.unwrap(), vec!["1-0"]);
        assert_eq!(miss.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_fetch_failure_fails_only_its_group() {
        let loader = loader(RecordingFetcher::failing_for("manga"));

        let (ok_a, err_a, err_b) = tokio::join!(
            loader.load(Policy::Public, key("anime", 1)),
            loader.load(Policy::Public, key("manga", 1)),
            loader.load(Policy::Public, key("manga", 2)),
        );

        assert_eq!(ok_a.unwrap(), vec!["1-0"]);
        assert_matches!(err_a, Err(LoadError::Fetch(_)));
        assert_matches!(err_b, Err(LoadError::Fetch(_)));
        assert_eq!(loader.fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_distinct_policies_fetch_separately() {
        let loader = loader(RecordingFetcher::new());

        let (public, staff) = tokio::join!(
            loader.load(Policy::Public, key("anime", 1)),
            loader.load(Policy::MediaStaff, key("anime", 1)),
        );

        assert!(public.is_ok());
        assert!(staff.is_ok());
        assert_eq!(loader.fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_distinct_groups_fetch_separately() {
        let loader = loader(RecordingFetcher::new());

        let (anime, manga) = tokio::join!(
            loader.load(Policy::Public, key("anime", 1)),
            loader.load(Policy::Public, key("manga", 1)),
        );

        assert!(anime.is_ok());
        assert!(manga.is_ok());

        assert_eq!(loader.fetcher.call_count(), 2);
        let batches = loader.fetcher.batches.lock().unwrap();
        let groups: Vec<_> = batches.iter().map(|(_, g, _)| *g).collect();
        assert!(groups.contains(&"anime"));
        assert!(groups.contains(&"manga"));
    }

    #[tokio::test]
    async fn test_two_relations_yield_one_fetch_each() {
        // characters for {1,2,3} and staff for {1} in the same tick make
        // exactly two queries
        let characters = loader(RecordingFetcher::new());
        let staff = loader(RecordingFetcher::new());

        let (c1, c2, c3, s1) = tokio::join!(
            characters.load(Policy::Public, key("anime", 1)),
            characters.load(Policy::Public, key("anime", 2)),
            characters.load(Policy::Public, key("anime", 3)),
            staff.load(Policy::MediaStaff, key("anime", 1)),
        );

        assert!(c1.is_ok() && c2.is_ok() && c3.is_ok() && s1.is_ok());
        assert_eq!(characters.fetcher.call_count(), 1);
        assert_eq!(staff.fetcher.call_count(), 1);

        let batches = characters.fetcher.batches.lock().unwrap();
        assert_eq!(batches[0].2, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_new_batch_after_flush() {
        let loader = loader(RecordingFetcher::new());

        let first = loader.load(Policy::Public, key("anime", 1)).await;
        let second = loader.load(Policy::Public, key("anime", 1)).await;

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(loader.fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_dropped_request_issues_no_fetch() {
        let loader = AssociationLoader::with_delay(
            RecordingFetcher::new(),
            Duration::from_millis(20),
        );
        let fetcher = Arc::clone(&loader.fetcher);

        let pending = loader.load(Policy::Public, key("anime", 1));
        drop(pending);
        drop(loader);

        // Give the armed flush task time to wake up and find the state gone.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shared_rows_for_duplicate_requests() {
        let loader = loader(RecordingFetcher {
            rows_per_key: 3,
            ..RecordingFetcher::new()
        });

        let (a, b) = tokio::join!(
            loader.load(Policy::Public, key("anime", 7)),
            loader.load(Policy::Public, key("anime", 7)),
        );

        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(loader.fetcher.call_count(), 1);
    }
}
