//! Request cache
//!
//! A capacity-bounded, in-memory store of JSON response payloads keyed by
//! scope and id. Lookups run through [`CachePolicy`]: fresh entries are
//! served as-is, stale entries are served and flagged for refresh, expired
//! entries are dropped and refetched. Fetching goes through the retry loop,
//! sleeping the configured delay between attempts.
//!
//! There is no background refetching: a stale hit only marks the entry, and
//! the caller decides when to run [`RequestCache::refresh`].

use async_trait::async_trait;
use lru::LruCache;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::error::{FetchError, Result, RetryDecision};
use crate::policy::{CachePolicy, Freshness, RequestKind};

/// Entry count the cache is bounded to unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 128;

/// Identifies a cached request: a scope (e.g. "posts") plus an id within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    /// Scope of the request (e.g. "posts", "profiles")
    pub scope: String,

    /// Unique identifier within the scope
    pub id: String,
}

impl RequestKey {
    /// Create a new request key.
    pub fn new(scope: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.id)
    }
}

/// Data-fetching seam for [`RequestCache`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Payload type produced on success.
    type Output: Serialize + DeserializeOwned + Send;

    /// Run the underlying request once.
    async fn fetch(&self) -> Result<Self::Output>;

    /// Cache key for this request.
    fn key(&self) -> RequestKey;

    /// Budget classification; queries unless overridden.
    fn kind(&self) -> RequestKind {
        RequestKind::Query
    }
}

/// Cached payload with the bookkeeping the policy windows need.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: serde_json::Value,
    fetched_at: Instant,
    needs_refresh: bool,
}

/// Capacity-bounded request cache driven by a [`CachePolicy`].
///
/// Cloning is cheap and shares the underlying store.
#[derive(Clone)]
pub struct RequestCache {
    entries: Arc<Mutex<LruCache<RequestKey, CacheEntry>>>,
    policy: CachePolicy,
}

impl RequestCache {
    /// Create a cache with the default capacity.
    pub fn new(policy: CachePolicy) -> Self {
        Self::with_capacity(policy, DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(policy: CachePolicy, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            policy,
        }
    }

    /// The policy this cache runs under.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Get the payload for `fetcher`, consulting the cache first.
    ///
    /// Fresh hits and stale hits return the cached payload without running
    /// the fetcher; a stale hit additionally flags the entry for refresh.
    /// Misses and expired entries run the fetcher through the retry loop and
    /// store the result.
    pub async fn get_with<F: Fetcher>(&self, fetcher: &F) -> Result<F::Output> {
        let key = fetcher.key();

        {
            let mut entries = self.entries.lock().unwrap();
            if let Some(entry) = entries.get_mut(&key) {
                match self.policy.freshness_of(entry.fetched_at.elapsed()) {
                    Freshness::Fresh => {
                        return Ok(serde_json::from_value(entry.payload.clone())?);
                    }
                    Freshness::Stale => {
                        entry.needs_refresh = true;
                        tracing::debug!(%key, "serving stale entry");
                        return Ok(serde_json::from_value(entry.payload.clone())?);
                    }
                    Freshness::Expired => {
                        entries.pop(&key);
                    }
                }
            }
        }

        let value = self.fetch_with_retry(fetcher).await?;
        self.store(&key, &value)?;
        Ok(value)
    }

    /// Refetch unconditionally and replace the cached entry.
    pub async fn refresh<F: Fetcher>(&self, fetcher: &F) -> Result<F::Output> {
        let key = fetcher.key();
        let value = self.fetch_with_retry(fetcher).await?;
        self.store(&key, &value)?;
        Ok(value)
    }

    /// Run a request through the retry policy without touching the cache.
    ///
    /// Intended for mutation-kind fetchers, which are never cached; pair
    /// with [`RequestCache::invalidate_scope`] to drop what they outdate.
    pub async fn execute<F: Fetcher>(&self, fetcher: &F) -> Result<F::Output> {
        self.fetch_with_retry(fetcher).await
    }

    async fn fetch_with_retry<F: Fetcher>(&self, fetcher: &F) -> Result<F::Output> {
        let key = fetcher.key();
        let kind = fetcher.kind();
        let mut attempts = 0u32;

        loop {
            match fetcher.fetch().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempts += 1;
                    match self.policy.should_retry(kind, attempts, &err) {
                        RetryDecision::Retry => {
                            tracing::debug!(%key, attempts, "request failed; retrying");
                            tokio::time::sleep(self.policy.retry_delay).await;
                        }
                        RetryDecision::Stop => {
                            return Err(match err {
                                FetchError::Transient { .. } => FetchError::RetryBudgetExhausted {
                                    attempts,
                                    last: Box::new(err),
                                },
                                other => other,
                            });
                        }
                    }
                }
            }
        }
    }

    fn store<T: Serialize>(&self, key: &RequestKey, value: &T) -> Result<()> {
        let payload = serde_json::to_value(value)?;
        let mut entries = self.entries.lock().unwrap();
        entries.put(
            key.clone(),
            CacheEntry {
                payload,
                fetched_at: Instant::now(),
                needs_refresh: false,
            },
        );
        Ok(())
    }

    /// Freshness of the entry under `key`, if present. Does not touch LRU
    /// order.
    pub fn freshness(&self, key: &RequestKey) -> Option<Freshness> {
        let entries = self.entries.lock().unwrap();
        entries
            .peek(key)
            .map(|entry| self.policy.freshness_of(entry.fetched_at.elapsed()))
    }

    /// Whether a stale hit has been served for `key` since it was last
    /// stored.
    pub fn needs_refresh(&self, key: &RequestKey) -> bool {
        let entries = self.entries.lock().unwrap();
        entries.peek(key).map(|entry| entry.needs_refresh).unwrap_or(false)
    }

    /// Drop the entry under `key`. Returns true when an entry was removed.
    pub fn invalidate(&self, key: &RequestKey) -> bool {
        self.entries.lock().unwrap().pop(key).is_some()
    }

    /// Drop every entry whose key lives in `scope`. Returns the number of
    /// entries removed.
    pub fn invalidate_scope(&self, scope: &str) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let doomed: Vec<RequestKey> = entries
            .iter()
            .filter(|(key, _)| key.scope == scope)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            entries.pop(key);
        }

        doomed.len()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
