//! Per-platform summary at the reference matrix size

use crate::dataset::{BenchmarkDataset, PlatformSeries, REFERENCE_SIZE};
use crate::error::ReportResult;
use crate::metrics::{gflops, percent_change, speedup};
use crate::platform::{Platform, Tuning};
use serde::Serialize;

/// Comparison of the tuned CLBlast kernel against the reference kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceComparison {
    /// Reference kernel time in milliseconds
    pub reference_ms: f64,
    /// `reference_ms / after_ms`; above 1.0 means tuned CLBlast is faster
    pub speedup: f64,
}

/// Summary figures for one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    /// Platform described by this entry
    pub platform: Platform,
    /// Time before tuning, ms
    pub before_ms: f64,
    /// Time after tuning, ms
    pub after_ms: f64,
    /// `(after / before - 1) * 100`; positive means tuning made it slower
    pub change_pct: f64,
    /// Throughput before tuning
    pub before_gflops: f64,
    /// Throughput after tuning
    pub after_gflops: f64,
    /// Present when the reference dataset has an entry for this platform
    pub reference: Option<ReferenceComparison>,
}

impl PlatformSummary {
    /// Percent change rendered with sign and one decimal, e.g. `+15.6%`
    #[must_use]
    pub fn change_label(&self) -> String {
        format!("{:+.1}%", self.change_pct)
    }
}

/// Structured summary of the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Matrix size every figure refers to
    pub size: u32,
    /// Name of the reference kernel
    pub reference_kernel: String,
    /// One entry per platform, in dataset order
    pub platforms: Vec<PlatformSummary>,
}

impl Summary {
    /// Derive the summary at [`REFERENCE_SIZE`].
    ///
    /// # Errors
    ///
    /// Fails if a series lacks the reference size or carries a
    /// non-positive timing there.
    pub fn derive(dataset: &BenchmarkDataset) -> ReportResult<Self> {
        Self::derive_at(dataset, REFERENCE_SIZE)
    }

    /// Derive the summary at an arbitrary size present in every series.
    ///
    /// # Errors
    ///
    /// See [`Summary::derive`].
    pub fn derive_at(dataset: &BenchmarkDataset, size: u32) -> ReportResult<Self> {
        let platforms = dataset
            .platforms
            .iter()
            .map(|ps| summarize(dataset, ps, size))
            .collect::<ReportResult<Vec<_>>>()?;

        Ok(Self {
            size,
            reference_kernel: dataset.reference.kernel.clone(),
            platforms,
        })
    }

    /// Entry for `platform`
    #[must_use]
    pub fn platform(&self, platform: Platform) -> Option<&PlatformSummary> {
        self.platforms.iter().find(|p| p.platform == platform)
    }
}

fn summarize(
    dataset: &BenchmarkDataset,
    series: &PlatformSeries,
    size: u32,
) -> ReportResult<PlatformSummary> {
    let before_ms = series.time_at(Tuning::Before, size)?;
    let after_ms = series.time_at(Tuning::After, size)?;

    let reference = match dataset.reference.time_for(series.platform) {
        Some(reference_ms) if dataset.reference.size == size => Some(ReferenceComparison {
            reference_ms,
            speedup: speedup(reference_ms, after_ms)?,
        }),
        _ => None,
    };

    Ok(PlatformSummary {
        platform: series.platform,
        before_ms,
        after_ms,
        change_pct: percent_change(before_ms, after_ms)?,
        before_gflops: gflops(size, before_ms)?,
        after_gflops: gflops(size, after_ms)?,
        reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfive_at_1024() {
        let summary = Summary::derive(&BenchmarkDataset::clblast()).unwrap();
        let starfive = summary.platform(Platform::StarFive).unwrap();

        assert_eq!(starfive.before_ms, 348.72);
        assert_eq!(starfive.after_ms, 403.23);
        assert_eq!(starfive.change_label(), "+15.6%");
        assert!((starfive.after_gflops - 5.326).abs() / 5.326 < 0.01);

        let reference = starfive.reference.unwrap();
        assert_eq!(reference.reference_ms, 490.0);
        assert_eq!(format!("{:.2}", reference.speedup), "1.22");
    }

    #[test]
    fn no_speedup_away_from_reference_size() {
        let summary = Summary::derive_at(&BenchmarkDataset::clblast(), 2048).unwrap();
        assert_eq!(summary.size, 2048);
        assert!(summary.platforms.iter().all(|p| p.reference.is_none()));
    }

    #[test]
    fn missing_size_propagates() {
        assert!(Summary::derive_at(&BenchmarkDataset::clblast(), 1000).is_err());
    }
}
