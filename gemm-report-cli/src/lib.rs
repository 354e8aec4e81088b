//! CLBlast tuning report: charts and console summary
//!
//! Renders the execution-time, throughput and reference-kernel comparison
//! charts for the benchmark data in `gemm-report-core` and formats the
//! summary printed by the `gemm-report` binary.

pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;

pub use config::ReportConfig;
pub use error::{CliError, CliResult};
pub use report::{ReportArtifacts, ReportGenerator};
