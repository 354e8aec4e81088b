//! Log filter for the `gemm-report` binary

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or does not parse
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Filter taken from `RUST_LOG`, or [`DEFAULT_DIRECTIVE`] when the variable
/// is absent or invalid. A level set in `RUST_LOG` is never narrowed.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter())
}

/// Filter for an explicit directive string, falling back like [`env_filter`]
#[must_use]
pub fn filter_from(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| default_filter())
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVE)
}
