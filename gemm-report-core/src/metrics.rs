//! Throughput and comparison metrics derived from raw timings
//!
//! All functions are pure. Operands are validated up front so that a
//! zero or negative timing surfaces as [`ReportError::InvalidInput`]
//! instead of an infinite or negative throughput.

#![allow(clippy::cast_precision_loss)]

use crate::error::{ReportError, ReportResult};
use serde::Serialize;

const MS_PER_SECOND: f64 = 1_000.0;
const FLOPS_PER_GFLOP: f64 = 1e9;

/// Floating-point operation count of a square GEMM of dimension `size`.
///
/// Each of the `size²` outputs needs `size` multiply-adds, counted as two
/// operations, giving `2·size³`.
#[must_use]
pub fn gemm_flops(size: u32) -> f64 {
    let n = f64::from(size);
    2.0 * n * n * n
}

/// Throughput in GFLOPS of a square GEMM of dimension `size` finishing in `time_ms`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidInput`] when `size` is zero or `time_ms`
/// is not strictly positive and finite.
pub fn gflops(size: u32, time_ms: f64) -> ReportResult<f64> {
    if size == 0 {
        return Err(ReportError::invalid("matrix size", 0.0));
    }
    let time_ms = positive("time_ms", time_ms)?;
    let seconds = time_ms / MS_PER_SECOND;
    Ok(gemm_flops(size) / seconds / FLOPS_PER_GFLOP)
}

/// Signed relative change from `before` to `after`, in percent.
///
/// # Errors
///
/// Returns [`ReportError::InvalidInput`] when either timing is not strictly
/// positive and finite.
pub fn percent_change(before_ms: f64, after_ms: f64) -> ReportResult<f64> {
    let before_ms = positive("before time", before_ms)?;
    let after_ms = positive("after time", after_ms)?;
    Ok((after_ms / before_ms - 1.0) * 100.0)
}

/// How many times faster the tuned kernel is than the reference kernel.
///
/// # Errors
///
/// Returns [`ReportError::InvalidInput`] when either timing is not strictly
/// positive and finite.
pub fn speedup(reference_ms: f64, tuned_ms: f64) -> ReportResult<f64> {
    let reference_ms = positive("reference time", reference_ms)?;
    let tuned_ms = positive("tuned time", tuned_ms)?;
    Ok(reference_ms / tuned_ms)
}

fn positive(what: &'static str, value: f64) -> ReportResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ReportError::invalid(what, value))
    }
}

/// A single derived throughput point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThroughputSample {
    /// Matrix dimension
    pub size: u32,
    /// Measured wall time in milliseconds
    pub time_ms: f64,
    /// Derived throughput
    pub gflops: f64,
}

impl ThroughputSample {
    /// Derive a sample from a raw timing.
    ///
    /// # Errors
    ///
    /// Propagates [`gflops`] validation failures.
    pub fn new(size: u32, time_ms: f64) -> ReportResult<Self> {
        Ok(Self {
            size,
            time_ms,
            gflops: gflops(size, time_ms)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, rel: f64) {
        let err = ((actual - expected) / expected).abs();
        assert!(
            err <= rel,
            "expected {expected}, got {actual} (relative error {err})"
        );
    }

    #[test]
    fn gflops_matches_closed_form() {
        let t = 403.23;
        let expected = 2.0 * 1024f64.powi(3) / (t / 1000.0) / 1e9;
        assert_close(gflops(1024, t).unwrap(), expected, 1e-12);
        assert_close(gflops(1024, t).unwrap(), 5.326, 0.01);
    }

    #[test]
    fn gflops_rejects_zero_time_and_size() {
        assert!(matches!(
            gflops(1024, 0.0),
            Err(ReportError::InvalidInput { what: "time_ms", .. })
        ));
        assert!(matches!(
            gflops(0, 10.0),
            Err(ReportError::InvalidInput { what: "matrix size", .. })
        ));
        assert!(gflops(512, -1.0).is_err());
        assert!(gflops(512, f64::NAN).is_err());
        assert!(gflops(512, f64::INFINITY).is_err());
    }

    #[test]
    fn percent_change_is_signed() {
        let change = percent_change(348.72, 403.23).unwrap();
        assert_eq!(format!("{change:+.1}"), "+15.6");

        let change = percent_change(2.24, 2.18).unwrap();
        assert!(change < 0.0);
        assert_eq!(format!("{change:+.1}"), "-2.7");
    }

    #[test]
    fn speedup_of_starfive_reference() {
        let s = speedup(490.0, 403.23).unwrap();
        assert_eq!(format!("{s:.2}"), "1.22");
        assert!(speedup(490.0, 0.0).is_err());
    }

    #[test]
    fn throughput_sample_keeps_inputs() {
        let sample = ThroughputSample::new(512, 0.67).unwrap();
        assert_eq!(sample.size, 512);
        assert!((sample.time_ms - 0.67).abs() < f64::EPSILON);
        assert!(sample.gflops > 400.0);
    }
}
