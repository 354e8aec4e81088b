//! Core data and arithmetic for the CLBlast GEMM tuning report
//!
//! Holds the embedded benchmark measurements, derives GEMM throughput from
//! raw timings, and builds the per-platform summary that the CLI prints and
//! charts. Rendering lives in `gemm-report-cli`.

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod platform;
pub mod summary;

pub use dataset::{
    BenchmarkDataset, Measurement, PlatformSeries, REFERENCE_SIZE, ReferenceDataset, Series,
};
pub use error::{ReportError, ReportResult};
pub use metrics::{ThroughputSample, gemm_flops, gflops, percent_change, speedup};
pub use platform::{Platform, Tuning, UnknownPlatform};
pub use summary::{PlatformSummary, ReferenceComparison, Summary};
