//! Embedded CLBlast SGEMM measurements and the MyGEMM reference timings
//!
//! The tables below are the literal results of the benchmark runs; nothing
//! in this crate measures anything. [`BenchmarkDataset::clblast`] assembles
//! them into immutable series that are then passed by reference to the
//! summary and chart code.

use crate::error::{ReportError, ReportResult};
use crate::metrics::{ThroughputSample, gflops};
use crate::platform::{Platform, Tuning};
use serde::Serialize;
use tracing::debug;

/// Matrix size used for the single-point comparisons (the second entry of every series)
pub const REFERENCE_SIZE: u32 = 1024;

const SIZES: [u32; 15] = [
    512, 1024, 1536, 2048, 2560, 3072, 3584, 4096, 4608, 5120, 5632, 6144, 6656, 7168, 7680,
];

const STARFIVE_BEFORE_MS: [f64; 15] = [
    48.14, 348.72, 1107.78, 2705.25, 4958.80, 8517.10, 13420.55, 21250.17, 28303.73, 38763.34,
    51430.17, 66764.39, 84506.92, 105470.75, 129438.10,
];

const STARFIVE_AFTER_MS: [f64; 15] = [
    84.54, 403.23, 1163.78, 2770.00, 5009.62, 8580.04, 13472.75, 21286.54, 28335.54, 38788.23,
    51442.70, 66783.93, 84599.86, 105593.86, 129607.82,
];

const BANANAPI_BEFORE_MS: [f64; 15] = [
    65.34, 536.75, 1662.35, 2987.47, 5756.58, 9432.96, 14936.48, 25329.73, 31492.49, 45793.41,
    55395.67, 71432.26, 92673.23, 115439.74, 141445.13,
];

const BANANAPI_AFTER_MS: [f64; 15] = [
    90.14, 562.21, 1963.78, 2990.37, 5929.62, 9580.04, 15472.75, 26286.54, 32335.54, 46788.23,
    56442.70, 71783.93, 93599.86, 115593.86, 141607.82,
];

const INTEL_BEFORE_MS: [f64; 15] = [
    0.67, 2.24, 7.11, 16.79, 32.01, 54.58, 85.32, 127.17, 179.97, 248.62, 329.78, 432.77, 537.88,
    675.12, 819.14,
];

const INTEL_AFTER_MS: [f64; 15] = [
    0.68, 2.18, 7.02, 16.02, 31.03, 53.23, 82.10, 125.2, 167.34, 235.34, 310.34, 415.23, 523.45,
    654.23, 809.12,
];

/// MyGEMM kernel 11 timings at [`REFERENCE_SIZE`], in the order the comparison chart shows them
const MYGEMM_KERNEL11_MS: [(Platform, f64); 3] = [
    (Platform::BananaPi, 320.0),
    (Platform::StarFive, 490.0),
    (Platform::IntelXe, 7.0),
];

/// One benchmark record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Platform the run was taken on
    pub platform: Platform,
    /// Tuning state of the CLBlast kernels
    pub tuning: Tuning,
    /// Square matrix dimension
    pub size: u32,
    /// Wall time in milliseconds
    pub time_ms: f64,
}

/// Timings for one platform/tuning pair, ordered by ascending size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    sizes: Vec<u32>,
    times_ms: Vec<f64>,
}

impl Series {
    /// Build a series from parallel size and time columns.
    #[must_use]
    pub fn new(sizes: Vec<u32>, times_ms: Vec<f64>) -> Self {
        Self { sizes, times_ms }
    }

    /// Matrix sizes in ascending order
    #[must_use]
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// Wall times in milliseconds, index-aligned with [`Series::sizes`]
    #[must_use]
    pub fn times_ms(&self) -> &[f64] {
        &self.times_ms
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// True when the series has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Time measured for `size`, if present
    #[must_use]
    pub fn time_at(&self, size: u32) -> Option<f64> {
        self.sizes
            .binary_search(&size)
            .ok()
            .and_then(|idx| self.times_ms.get(idx).copied())
    }

    /// Iterate `(size, time_ms)` pairs
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.sizes.iter().copied().zip(self.times_ms.iter().copied())
    }

    /// GFLOPS for every point of the series.
    ///
    /// # Errors
    ///
    /// Fails on the first point with a non-positive size or time.
    pub fn throughput(&self) -> ReportResult<Vec<ThroughputSample>> {
        self.points()
            .map(|(size, time_ms)| ThroughputSample::new(size, time_ms))
            .collect()
    }

    /// GFLOPS values only, index-aligned with [`Series::sizes`].
    ///
    /// # Errors
    ///
    /// Fails on the first point with a non-positive size or time.
    pub fn gflops(&self) -> ReportResult<Vec<f64>> {
        self.points()
            .map(|(size, time_ms)| gflops(size, time_ms))
            .collect()
    }

    fn validate(&self, platform: Platform, tuning: Tuning) -> ReportResult<()> {
        if self.is_empty() {
            return Err(ReportError::inconsistent(
                platform,
                format!("{tuning} series is empty"),
            ));
        }
        if self.sizes.len() != self.times_ms.len() {
            return Err(ReportError::inconsistent(
                platform,
                format!(
                    "{tuning} series has {} sizes but {} timings",
                    self.sizes.len(),
                    self.times_ms.len()
                ),
            ));
        }
        if let Some(pair) = self.sizes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ReportError::inconsistent(
                platform,
                format!(
                    "{tuning} sizes not strictly increasing at {} -> {}",
                    pair[0], pair[1]
                ),
            ));
        }
        for (size, time_ms) in self.points() {
            gflops(size, time_ms)?;
        }
        Ok(())
    }
}

/// Before/after series for one platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSeries {
    /// Platform the series were recorded on
    pub platform: Platform,
    /// Default CLBlast parameters
    pub before: Series,
    /// Tuned CLBlast parameters
    pub after: Series,
}

impl PlatformSeries {
    /// Series for the requested tuning state
    #[must_use]
    pub const fn series(&self, tuning: Tuning) -> &Series {
        match tuning {
            Tuning::Before => &self.before,
            Tuning::After => &self.after,
        }
    }

    /// Shared size sequence of both series
    #[must_use]
    pub fn sizes(&self) -> &[u32] {
        self.before.sizes()
    }

    /// Time for `tuning` at `size`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingSize`] if no point has that size.
    pub fn time_at(&self, tuning: Tuning, size: u32) -> ReportResult<f64> {
        self.series(tuning)
            .time_at(size)
            .ok_or(ReportError::MissingSize {
                platform: self.platform,
                size,
            })
    }

    fn validate(&self) -> ReportResult<()> {
        self.before.validate(self.platform, Tuning::Before)?;
        self.after.validate(self.platform, Tuning::After)?;
        if self.before.sizes() != self.after.sizes() {
            return Err(ReportError::inconsistent(
                self.platform,
                "before and after series use different size sequences",
            ));
        }
        Ok(())
    }
}

/// Timings of the baseline kernel at a single matrix size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceDataset {
    /// Human-readable kernel name for legends
    pub kernel: String,
    /// Matrix size all entries were measured at
    pub size: u32,
    entries: Vec<(Platform, f64)>,
}

impl ReferenceDataset {
    /// Build a reference dataset.
    #[must_use]
    pub fn new(kernel: impl Into<String>, size: u32, entries: Vec<(Platform, f64)>) -> Self {
        Self {
            kernel: kernel.into(),
            size,
            entries,
        }
    }

    /// Reference time for `platform`, if one was recorded
    #[must_use]
    pub fn time_for(&self, platform: Platform) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, t)| *t)
    }

    /// Entries in presentation order
    #[must_use]
    pub fn entries(&self) -> &[(Platform, f64)] {
        &self.entries
    }
}

/// Every series of the report plus the reference timings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkDataset {
    /// Per-platform series in panel order
    pub platforms: Vec<PlatformSeries>,
    /// Baseline kernel timings
    pub reference: ReferenceDataset,
}

impl BenchmarkDataset {
    /// The CLBlast tuning results and MyGEMM kernel 11 baseline.
    #[must_use]
    pub fn clblast() -> Self {
        let series = |before: &[f64], after: &[f64]| {
            (
                Series::new(SIZES.to_vec(), before.to_vec()),
                Series::new(SIZES.to_vec(), after.to_vec()),
            )
        };
        let platforms = [
            (Platform::StarFive, series(&STARFIVE_BEFORE_MS[..], &STARFIVE_AFTER_MS[..])),
            (Platform::BananaPi, series(&BANANAPI_BEFORE_MS[..], &BANANAPI_AFTER_MS[..])),
            (Platform::IntelXe, series(&INTEL_BEFORE_MS[..], &INTEL_AFTER_MS[..])),
        ]
        .into_iter()
        .map(|(platform, (before, after))| PlatformSeries {
            platform,
            before,
            after,
        })
        .collect();

        Self {
            platforms,
            reference: ReferenceDataset::new(
                "MyGEMM (kernel 11)",
                REFERENCE_SIZE,
                MYGEMM_KERNEL11_MS.to_vec(),
            ),
        }
    }

    /// Series for `platform`, if the dataset covers it
    #[must_use]
    pub fn platform(&self, platform: Platform) -> Option<&PlatformSeries> {
        self.platforms.iter().find(|p| p.platform == platform)
    }

    /// Flatten every series into individual records
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.platforms.iter().flat_map(|ps| {
            [Tuning::Before, Tuning::After]
                .into_iter()
                .flat_map(move |tuning| {
                    ps.series(tuning).points().map(move |(size, time_ms)| Measurement {
                        platform: ps.platform,
                        tuning,
                        size,
                        time_ms,
                    })
                })
        })
    }

    /// Check every series and reference timing against the dataset invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> ReportResult<()> {
        for series in &self.platforms {
            series.validate()?;
        }
        for &(platform, time_ms) in self.reference.entries() {
            gflops(self.reference.size, time_ms).map_err(|_| {
                ReportError::inconsistent(
                    platform,
                    format!("reference time {time_ms} is not a positive timing"),
                )
            })?;
        }
        debug!(
            platforms = self.platforms.len(),
            measurements = self.measurements().count(),
            "benchmark dataset validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_is_valid() {
        BenchmarkDataset::clblast().validate().unwrap();
    }

    #[test]
    fn every_series_has_fifteen_increasing_sizes() {
        let dataset = BenchmarkDataset::clblast();
        for ps in &dataset.platforms {
            for tuning in [Tuning::Before, Tuning::After] {
                let sizes = ps.series(tuning).sizes();
                assert_eq!(sizes.len(), 15, "{} {tuning}", ps.platform);
                assert!(sizes.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(sizes[1], REFERENCE_SIZE);
            }
        }
    }

    #[test]
    fn time_lookup_by_size() {
        let dataset = BenchmarkDataset::clblast();
        let starfive = dataset.platform(Platform::StarFive).unwrap();
        assert_eq!(starfive.time_at(Tuning::Before, 1024).unwrap(), 348.72);
        assert_eq!(starfive.time_at(Tuning::After, 1024).unwrap(), 403.23);
        assert!(matches!(
            starfive.time_at(Tuning::After, 1000),
            Err(ReportError::MissingSize { size: 1000, .. })
        ));
    }

    #[test]
    fn measurements_cover_all_records() {
        let dataset = BenchmarkDataset::clblast();
        assert_eq!(dataset.measurements().count(), 3 * 2 * 15);
        assert!(dataset.measurements().all(|m| m.time_ms > 0.0));
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let mut dataset = BenchmarkDataset::clblast();
        let mut sizes = SIZES.to_vec();
        sizes[3] = 2000;
        dataset.platforms[1].after = Series::new(sizes, BANANAPI_AFTER_MS.to_vec());
        let err = dataset.validate().unwrap_err();
        assert!(matches!(
            err,
            ReportError::InconsistentSeries {
                platform: Platform::BananaPi,
                ..
            }
        ));
    }

    #[test]
    fn unsorted_and_ragged_series_are_rejected() {
        let unsorted = Series::new(vec![1024, 512], vec![1.0, 2.0]);
        assert!(unsorted.validate(Platform::IntelXe, Tuning::Before).is_err());

        let ragged = Series::new(vec![512, 1024], vec![1.0]);
        assert!(ragged.validate(Platform::IntelXe, Tuning::Before).is_err());

        let zero_time = Series::new(vec![512], vec![0.0]);
        assert!(matches!(
            zero_time.validate(Platform::IntelXe, Tuning::Before),
            Err(ReportError::InvalidInput { .. })
        ));
    }

    #[test]
    fn throughput_follows_series_order() {
        let dataset = BenchmarkDataset::clblast();
        let intel = dataset.platform(Platform::IntelXe).unwrap();
        let samples = intel.after.throughput().unwrap();
        assert_eq!(samples.len(), intel.after.len());
        assert_eq!(samples[1].size, REFERENCE_SIZE);
        let values = intel.after.gflops().unwrap();
        assert!(samples.iter().zip(&values).all(|(s, v)| s.gflops == *v));
    }

    #[test]
    fn reference_lookup() {
        let dataset = BenchmarkDataset::clblast();
        assert_eq!(dataset.reference.time_for(Platform::StarFive), Some(490.0));
        assert_eq!(dataset.reference.size, REFERENCE_SIZE);
        assert_eq!(dataset.reference.entries()[0].0, Platform::BananaPi);
    }
}
