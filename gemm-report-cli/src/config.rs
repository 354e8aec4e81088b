//! Built-in report configuration
//!
//! The settings ship inside the binary as `config/default.toml`. They are
//! parsed exactly once at start-up into an immutable [`ReportConfig`] that is
//! handed to the report pipeline by reference.

#![allow(missing_docs)]

use std::path::PathBuf;

use gemm_report_core::Platform;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    pub summary: SummaryConfig,
}

impl ReportConfig {
    /// Parse the configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Fails if the embedded TOML does not parse or names an unknown platform.
    pub fn embedded() -> CliResult<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] for malformed TOML and
    /// [`CliError::UnknownPlatform`] for an unrecognised speed-up platform.
    pub fn from_toml(raw: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.summary.speedup_platform()?;
        Ok(config)
    }

    /// Copy of this configuration writing into `directory` instead.
    #[must_use]
    pub fn with_output_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub time_chart: String,
    pub throughput_chart: String,
    pub reference_chart: String,
    pub summary_json: String,
    #[serde(default = "default_write_json")]
    pub write_json: bool,
}

impl OutputConfig {
    #[must_use]
    pub fn time_chart_path(&self) -> PathBuf {
        self.directory.join(&self.time_chart)
    }

    #[must_use]
    pub fn throughput_chart_path(&self) -> PathBuf {
        self.directory.join(&self.throughput_chart)
    }

    #[must_use]
    pub fn reference_chart_path(&self) -> PathBuf {
        self.directory.join(&self.reference_chart)
    }

    #[must_use]
    pub fn summary_json_path(&self) -> PathBuf {
        self.directory.join(&self.summary_json)
    }
}

const fn default_write_json() -> bool {
    true
}

/// Pixel dimensions and font sizes for the SVG charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub panel_width: u32,
    pub panel_height: u32,
    pub reference_width: u32,
    pub reference_height: u32,
    pub title_font_size: u32,
    pub axis_font_size: u32,
    pub tick_font_size: u32,
    pub legend_font_size: u32,
    pub annotation_font_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            panel_width: 700,
            panel_height: 600,
            reference_width: 1000,
            reference_height: 600,
            title_font_size: 28,
            axis_font_size: 20,
            tick_font_size: 14,
            legend_font_size: 16,
            annotation_font_size: 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub speedup_platform: String,
}

impl SummaryConfig {
    /// Platform whose reference speed-up is printed.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownPlatform`] if the key is not a known platform.
    pub fn speedup_platform(&self) -> CliResult<Platform> {
        self.speedup_platform
            .parse()
            .map_err(|_| CliError::UnknownPlatform(self.speedup_platform.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = ReportConfig::embedded().unwrap();
        assert_eq!(config.output.directory, PathBuf::from("figures"));
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(
            config.summary.speedup_platform().unwrap(),
            Platform::StarFive
        );
        assert!(config.output.write_json);
    }

    #[test]
    fn output_paths_are_joined() {
        let config = ReportConfig::embedded().unwrap().with_output_dir("/tmp/out");
        assert_eq!(
            config.output.time_chart_path(),
            PathBuf::from("/tmp/out/clblast_time_comparison.svg")
        );
        assert_eq!(
            config.output.reference_chart_path(),
            PathBuf::from("/tmp/out/mygemm_vs_clblast.svg")
        );
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let raw = DEFAULT_CONFIG.replace("\"star_five\"", "\"jetson\"");
        assert!(matches!(
            ReportConfig::from_toml(&raw),
            Err(CliError::UnknownPlatform(name)) if name == "jetson"
        ));
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(matches!(
            ReportConfig::from_toml("[output"),
            Err(CliError::Config(_))
        ));
    }
}
