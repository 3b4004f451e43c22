//! Fetch error taxonomy
//!
//! Failures fall into three externally meaningful classes: authentication
//! failures (never retried), transient failures (retried within the budget),
//! and budget exhaustion (the terminal form of a transient failure).

use thiserror::Error;

/// Status code that classifies a failure as an authentication failure.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request was rejected for lack of credentials. Retrying cannot
    /// help, so the retry predicate stops immediately.
    #[error("Authentication failure: status {status}")]
    Authentication {
        /// HTTP status code that triggered the classification
        status: u16,
    },

    /// A failure that may succeed on retry (server error, timeout, flaky
    /// network).
    #[error("Transient failure: status {status}: {message}")]
    Transient {
        /// HTTP status code reported by the request
        status: u16,
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Every attempt in the budget failed; the last failure is attached.
    #[error("Retry budget exhausted after {attempts} attempts")]
    RetryBudgetExhausted {
        /// Number of attempts that ran before giving up
        attempts: u32,
        /// The failure from the final attempt
        #[source]
        last: Box<FetchError>,
    },

    /// Payload (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FetchError {
    /// Classify a failed request by status code: 401 becomes an
    /// authentication failure, everything else is transient.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == STATUS_UNAUTHORIZED {
            Self::Authentication { status }
        } else {
            Self::Transient {
                status,
                message: message.into(),
            }
        }
    }

    /// Whether this failure is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Status code carried by the failure, if it has one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status } | Self::Transient { status, .. } => Some(*status),
            Self::RetryBudgetExhausted { last, .. } => last.status(),
            Self::Serialization(_) => None,
        }
    }
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Verdict of the retry predicate after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Run another attempt after the configured delay.
    Retry,

    /// Give up and surface the failure to the caller.
    Stop,
}

// ============================================================================
// Tests
// ============================================================================
