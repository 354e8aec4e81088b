//! Error types for report rendering and output

use std::path::{Path, PathBuf};

use gemm_report_core::ReportError;
use thiserror::Error;

/// Errors that can abort a report run
#[derive(Error, Debug)]
pub enum CliError {
    /// Metric or dataset failure from the core crate
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Embedded configuration failed to parse
    #[error("invalid report configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configured speed-up platform is not part of the dataset
    #[error("unknown platform in configuration: {0}")]
    UnknownPlatform(String),

    /// Output directory or file could not be created or written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The charting backend reported a drawing failure
    #[error("failed to render {chart}: {reason}")]
    Render {
        /// Chart or panel being drawn
        chart: String,
        /// Backend message
        reason: String,
    },

    /// Summary serialization failed
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn render(chart: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Render {
            chart: chart.into(),
            reason: err.to_string(),
        }
    }
}

/// Result type for the CLI crate
pub type CliResult<T> = Result<T, CliError>;
