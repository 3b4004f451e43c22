//! Cache and retry policy
//!
//! Declarative knobs for the request cache: how long a result stays fresh,
//! how long it is retained once stale, and how many attempts a failing
//! request gets before the failure is surfaced. The policy is plain data;
//! [`crate::cache::RequestCache`] consumes it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{FetchError, RetryDecision};

/// Request classification for retry budgeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestKind {
    /// Read-only request; retried up to the full budget.
    #[default]
    Query,

    /// State-changing request; gets the smaller mutation budget.
    Mutation,
}

/// Where a cached entry sits relative to the policy windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Younger than the staleness window; served as-is.
    Fresh,

    /// Past the staleness window but still retained; served, and flagged
    /// for refresh.
    Stale,

    /// Past the eviction window; treated as absent.
    Expired,
}

/// Cache policy
///
/// Durations serialize as integer milliseconds so the policy can live in
/// application config next to the other tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Window during which a cached result is considered fresh.
    #[serde(with = "duration_ms")]
    pub stale_after: Duration,

    /// Window after which a cached result is dropped outright. Values below
    /// `stale_after` are treated as equal to it.
    #[serde(with = "duration_ms")]
    pub evict_after: Duration,

    /// Maximum attempts for query-kind requests.
    pub retry_limit: u32,

    /// Maximum attempts for mutation-kind requests.
    pub mutation_retry_limit: u32,

    /// Pause between attempts.
    #[serde(with = "duration_ms")]
    pub retry_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60),
            evict_after: Duration::from_secs(300), // 5 minutes
            retry_limit: 3,
            mutation_retry_limit: 1,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl CachePolicy {
    /// Create a policy with the default windows and budgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the staleness window.
    pub fn stale_after(mut self, window: Duration) -> Self {
        self.stale_after = window;
        self
    }

    /// Set the eviction window.
    pub fn evict_after(mut self, window: Duration) -> Self {
        self.evict_after = window;
        self
    }

    /// Set the attempt cap for query-kind requests.
    pub fn retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = limit;
        self
    }

    /// Set the attempt cap for mutation-kind requests.
    pub fn mutation_retry_limit(mut self, limit: u32) -> Self {
        self.mutation_retry_limit = limit;
        self
    }

    /// Set the pause between attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Attempt cap for a request kind.
    pub fn attempt_limit(&self, kind: RequestKind) -> u32 {
        match kind {
            RequestKind::Query => self.retry_limit,
            RequestKind::Mutation => self.mutation_retry_limit,
        }
    }

    /// Effective eviction window, never below the staleness window.
    pub fn eviction_window(&self) -> Duration {
        self.evict_after.max(self.stale_after)
    }

    /// Decide whether a request should run again after `attempts` completed
    /// attempts ended in `error`.
    ///
    /// Authentication failures stop at any attempt count. Transient failures
    /// retry while the attempt count is under the kind's cap. Anything else
    /// stops. The first attempt always runs; this predicate only gates
    /// retries.
    pub fn should_retry(
        &self,
        kind: RequestKind,
        attempts: u32,
        error: &FetchError,
    ) -> RetryDecision {
        match error {
            FetchError::Authentication { .. } => RetryDecision::Stop,
            FetchError::Transient { .. } if attempts < self.attempt_limit(kind) => {
                RetryDecision::Retry
            }
            _ => RetryDecision::Stop,
        }
    }

    /// Place an entry age within the freshness windows. Both windows are
    /// half-open: an entry exactly `stale_after` old is already stale.
    pub fn freshness_of(&self, age: Duration) -> Freshness {
        if age < self.stale_after {
            Freshness::Fresh
        } else if age < self.eviction_window() {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn transient() -> FetchError {
        FetchError::from_status(500, "upstream down")
    }

    #[test]
    fn test_transient_retries_under_budget() {
        let policy = CachePolicy::default();

        assert_eq!(
            policy.should_retry(RequestKind::Query, 1, &transient()),
            RetryDecision::Retry
        );
        assert_eq!(
            policy.should_retry(RequestKind::Query, 2, &transient()),
            RetryDecision::Retry
        );
        assert_eq!(
            policy.should_retry(RequestKind::Query, 3, &transient()),
            RetryDecision::Stop
        );
        assert_eq!(
            policy.should_retry(RequestKind::Query, 4, &transient()),
            RetryDecision::Stop
        );
    }

    #[test]
    fn test_unauthorized_stops_at_any_attempt_count() {
        let policy = CachePolicy::default();
        let err = FetchError::from_status(401, "token expired");

        assert_eq!(
            policy.should_retry(RequestKind::Query, 1, &err),
            RetryDecision::Stop
        );
        assert_eq!(
            policy.should_retry(RequestKind::Query, 99, &err),
            RetryDecision::Stop
        );
    }

    #[test]
    fn test_mutation_budget_is_smaller() {
        let policy = CachePolicy::default();

        assert_eq!(
            policy.should_retry(RequestKind::Mutation, 1, &transient()),
            RetryDecision::Stop
        );

        let policy = CachePolicy::new().mutation_retry_limit(2);
        assert_eq!(
            policy.should_retry(RequestKind::Mutation, 1, &transient()),
            RetryDecision::Retry
        );
        assert_eq!(
            policy.should_retry(RequestKind::Mutation, 2, &transient()),
            RetryDecision::Stop
        );
    }

    #[test]
    fn test_freshness_windows_are_half_open() {
        let policy = CachePolicy::default();

        assert_eq!(policy.freshness_of(Duration::ZERO), Freshness::Fresh);
        assert_eq!(policy.freshness_of(Duration::from_secs(59)), Freshness::Fresh);
        assert_eq!(policy.freshness_of(Duration::from_secs(60)), Freshness::Stale);
        assert_eq!(policy.freshness_of(Duration::from_secs(299)), Freshness::Stale);
        assert_eq!(policy.freshness_of(Duration::from_secs(300)), Freshness::Expired);
    }

    #[test]
    fn test_eviction_window_never_below_staleness() {
        let policy = CachePolicy::new()
            .stale_after(Duration::from_secs(600))
            .evict_after(Duration::from_secs(60));

        assert_eq!(policy.eviction_window(), Duration::from_secs(600));
        // The stale band collapses: entries go straight from fresh to expired.
        assert_eq!(policy.freshness_of(Duration::from_secs(599)), Freshness::Fresh);
        assert_eq!(policy.freshness_of(Duration::from_secs(600)), Freshness::Expired);
    }

    #[test]
    fn test_policy_deserializes_from_sparse_config() {
        let json = r#"{ "stale_after": 5000, "retry_limit": 5 }"#;
        let policy: CachePolicy = serde_json::from_str(json).unwrap();

        assert_eq!(policy.stale_after, Duration::from_secs(5));
        assert_eq!(policy.evict_after, Duration::from_secs(300));
        assert_eq!(policy.retry_limit, 5);
        assert_eq!(policy.mutation_retry_limit, 1);
        assert_eq!(policy.retry_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_policy_serializes_durations_as_millis() {
        let value = serde_json::to_value(CachePolicy::default()).unwrap();

        assert_eq!(value["stale_after"], 60_000);
        assert_eq!(value["evict_after"], 300_000);
        assert_eq!(value["retry_delay"], 1_000);
    }
}
