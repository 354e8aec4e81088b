//! Error types for dataset validation and metric derivation

use crate::platform::Platform;
use thiserror::Error;

/// Errors raised while deriving metrics or summaries from benchmark data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// A metric was requested with a non-positive or non-finite operand
    #[error("invalid input: {what} must be positive and finite, got {value}")]
    InvalidInput {
        /// Name of the offending operand
        what: &'static str,
        /// Value that was rejected
        value: f64,
    },

    /// A series violates the dataset invariants
    #[error("inconsistent series for {platform}: {reason}")]
    InconsistentSeries {
        /// Platform owning the series
        platform: Platform,
        /// Which invariant was broken
        reason: String,
    },

    /// A lookup by matrix size found no measurement
    #[error("no measurement for size {size} on {platform}")]
    MissingSize {
        /// Platform that was searched
        platform: Platform,
        /// Requested matrix size
        size: u32,
    },
}

impl ReportError {
    pub(crate) const fn invalid(what: &'static str, value: f64) -> Self {
        Self::InvalidInput { what, value }
    }

    pub(crate) fn inconsistent(platform: Platform, reason: impl Into<String>) -> Self {
        Self::InconsistentSeries {
            platform,
            reason: reason.into(),
        }
    }
}

/// Result type for report derivation
pub type ReportResult<T> = Result<T, ReportError>;
