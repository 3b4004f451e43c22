//! Verve Fetch
//!
//! Declarative request caching policy and the small cache that runs it:
//!
//! - Freshness and eviction windows over cached response payloads
//! - A retry predicate with an authentication carve-out (401 never retries)
//! - A separate, smaller retry budget for mutation-kind requests
//! - An LRU-bounded store with scope-level invalidation
//!
//! Everything is in-process and foreground: no persistence, no background
//! refetch tasks.

pub mod cache;
pub mod error;
pub mod policy;

pub use cache::{Fetcher, RequestCache, RequestKey};
pub use error::{FetchError, RetryDecision};
pub use policy::{CachePolicy, Freshness, RequestKind};
