//! Report generation: the three charts, the JSON summary, and the file writes

use std::fs;
use std::path::{Path, PathBuf};

use gemm_report_core::{BenchmarkDataset, Platform, ReportError, Summary, Tuning};
use tracing::{debug, info};

use crate::chart::{BarPanel, Scale, render_grouped_bar_panel, render_svg};
use crate::config::{ChartConfig, ReportConfig};
use crate::error::{CliError, CliResult};

const SIZE_AXIS: &str = "Matrix size";
const TIME_AXIS: &str = "Execution time (ms)";
const THROUGHPUT_AXIS: &str = "Throughput (GFLOPS)";
const PLATFORM_AXIS: &str = "Platform";
const TUNED_LABEL: &str = "CLBlast (tuned)";

/// Times span several orders of magnitude across platforms
const REFERENCE_SCALE: Scale = Scale::Log;

/// Which value a per-platform panel plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelMetric {
    Time,
    Throughput,
}

impl PanelMetric {
    /// Value axis description and scale
    const fn axis(self) -> (&'static str, Scale) {
        match self {
            Self::Time => (TIME_AXIS, Scale::Log),
            Self::Throughput => (THROUGHPUT_AXIS, Scale::Linear),
        }
    }
}

/// Files produced by a report run, plus the summary that was derived
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    /// Summary at the reference size
    pub summary: Summary,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

/// Drives chart rendering and output for one dataset
pub struct ReportGenerator<'a> {
    dataset: &'a BenchmarkDataset,
    config: &'a ReportConfig,
}

impl<'a> ReportGenerator<'a> {
    /// Borrow the dataset and configuration for one run
    #[must_use]
    pub const fn new(dataset: &'a BenchmarkDataset, config: &'a ReportConfig) -> Self {
        Self { dataset, config }
    }

    /// Validate the dataset, render every chart, and write all outputs.
    ///
    /// Files are written one after another; a failure leaves the files
    /// already written in place.
    ///
    /// # Errors
    ///
    /// Fails on dataset invariant violations, rendering errors, or any
    /// I/O error creating the output directory or writing a file.
    pub fn generate(&self) -> CliResult<ReportArtifacts> {
        self.dataset.validate()?;
        let summary = Summary::derive(self.dataset)?;

        let output = &self.config.output;
        fs::create_dir_all(&output.directory)
            .map_err(|e| CliError::io(&output.directory, e))?;
        debug!(dir = %output.directory.display(), "output directory ready");

        let chart = &self.config.chart;
        let mut written = Vec::new();

        let svg = time_comparison_svg(self.dataset, chart)?;
        written.push(write_output(&output.time_chart_path(), &svg)?);

        let svg = throughput_svg(self.dataset, chart)?;
        written.push(write_output(&output.throughput_chart_path(), &svg)?);

        let svg = reference_comparison_svg(self.dataset, chart)?;
        written.push(write_output(&output.reference_chart_path(), &svg)?);

        if output.write_json {
            let json = serde_json::to_string_pretty(&summary)?;
            written.push(write_output(&output.summary_json_path(), &json)?);
        }

        Ok(ReportArtifacts { summary, written })
    }
}

fn write_output(path: &Path, contents: &str) -> CliResult<PathBuf> {
    fs::write(path, contents).map_err(|e| CliError::io(path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "saved");
    Ok(path.to_path_buf())
}

/// Execution time before and after tuning, one log-scale panel per platform.
///
/// # Errors
///
/// Returns [`CliError::Render`] on drawing failures.
pub fn time_comparison_svg(dataset: &BenchmarkDataset, style: &ChartConfig) -> CliResult<String> {
    platform_panels_svg("time comparison", dataset, style, PanelMetric::Time)
}

/// GEMM throughput before and after tuning, one linear panel per platform.
///
/// # Errors
///
/// Fails if a timing is not positive or drawing fails.
pub fn throughput_svg(dataset: &BenchmarkDataset, style: &ChartConfig) -> CliResult<String> {
    platform_panels_svg("throughput", dataset, style, PanelMetric::Throughput)
}

fn platform_panels_svg(
    name: &str,
    dataset: &BenchmarkDataset,
    style: &ChartConfig,
    metric: PanelMetric,
) -> CliResult<String> {
    let rows = dataset
        .platforms
        .iter()
        .map(|ps| {
            let (before, after) = match metric {
                PanelMetric::Time => (
                    ps.before.times_ms().to_vec(),
                    ps.after.times_ms().to_vec(),
                ),
                PanelMetric::Throughput => (ps.before.gflops()?, ps.after.gflops()?),
            };
            let categories = ps.sizes().iter().map(u32::to_string).collect::<Vec<_>>();
            Ok::<_, ReportError>((ps.platform, categories, before, after))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (y_desc, scale) = metric.axis();
    let columns = u32::try_from(rows.len().max(1)).unwrap_or(u32::MAX);
    let size = (style.panel_width.saturating_mul(columns), style.panel_height);

    render_svg(name, size, |root| {
        let areas = root.split_evenly((1, rows.len().max(1)));
        for (area, (platform, categories, before, after)) in areas.iter().zip(&rows) {
            let panel = BarPanel {
                title: platform.display_name(),
                x_desc: SIZE_AXIS,
                y_desc,
                categories: categories.clone(),
                first: before,
                second: after,
                first_label: Tuning::Before.label(),
                second_label: Tuning::After.label(),
                annotate: false,
            };
            render_grouped_bar_panel(area, &panel, scale, style)?;
        }
        Ok(())
    })
}

/// Reference kernel against tuned CLBlast at the reference size, log scale,
/// with every bar annotated.
///
/// # Errors
///
/// Returns [`ReportError::MissingSize`] if a reference platform has no
/// tuned measurement at the reference size, or a render error.
pub fn reference_comparison_svg(
    dataset: &BenchmarkDataset,
    style: &ChartConfig,
) -> CliResult<String> {
    let reference = &dataset.reference;
    let mut categories = Vec::new();
    let mut reference_ms = Vec::new();
    let mut tuned_ms = Vec::new();

    for &(platform, time_ms) in reference.entries() {
        let tuned = dataset
            .platform(platform)
            .ok_or(ReportError::MissingSize {
                platform,
                size: reference.size,
            })?
            .time_at(Tuning::After, reference.size)?;
        categories.push(platform.short_name().to_string());
        reference_ms.push(time_ms);
        tuned_ms.push(tuned);
    }

    let title = format!(
        "{} vs CLBlast ({}×{} matrix)",
        kernel_family(&reference.kernel),
        reference.size,
        reference.size
    );
    let panel = BarPanel {
        title: &title,
        x_desc: PLATFORM_AXIS,
        y_desc: TIME_AXIS,
        categories,
        first: &reference_ms,
        second: &tuned_ms,
        first_label: &reference.kernel,
        second_label: TUNED_LABEL,
        annotate: true,
    };

    render_svg(
        "reference comparison",
        (style.reference_width, style.reference_height),
        |root| render_grouped_bar_panel(root, &panel, REFERENCE_SCALE, style),
    )
}

/// Kernel name without the variant suffix, e.g. `MyGEMM` for `MyGEMM (kernel 11)`
fn kernel_family(kernel: &str) -> &str {
    kernel.split(" (").next().unwrap_or(kernel).trim()
}

/// Speed-up line data for the designated platform, if the summary has one
#[must_use]
pub fn speedup_entry(summary: &Summary, platform: Platform) -> Option<(f64, f64, f64)> {
    let entry = summary.platform(platform)?;
    let reference = entry.reference?;
    Some((reference.reference_ms, entry.after_ms, reference.speedup))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEFORE_FILL: &str = "opacity=\"0.8\" fill=\"#4682B4\"";
    const AFTER_FILL: &str = "opacity=\"0.8\" fill=\"#F08080\"";

    fn has_text(svg: &str, text: &str) -> bool {
        svg.contains(&format!(">\n{text}\n</text>"))
    }

    fn assert_bar_colors(svg: &str) {
        let before = svg.find(BEFORE_FILL).expect("steel blue bars");
        let after = svg.find(AFTER_FILL).expect("light coral bars");
        assert!(before < after, "first series must be drawn in steel blue");
    }

    #[test]
    fn panel_axes_per_metric() {
        assert_eq!(PanelMetric::Time.axis(), (TIME_AXIS, Scale::Log));
        assert_eq!(PanelMetric::Throughput.axis(), (THROUGHPUT_AXIS, Scale::Linear));
        assert_eq!(REFERENCE_SCALE, Scale::Log);
    }

    #[test]
    fn every_chart_uses_the_same_bar_colors() {
        let dataset = BenchmarkDataset::clblast();
        let style = ChartConfig::default();
        for svg in [
            time_comparison_svg(&dataset, &style).unwrap(),
            throughput_svg(&dataset, &style).unwrap(),
            reference_comparison_svg(&dataset, &style).unwrap(),
        ] {
            assert_bar_colors(&svg);
        }
    }

    #[test]
    fn kernel_family_strips_variant() {
        assert_eq!(kernel_family("MyGEMM (kernel 11)"), "MyGEMM");
        assert_eq!(kernel_family("cuBLAS"), "cuBLAS");
    }

    #[test]
    fn time_chart_has_a_panel_per_platform() {
        let svg = time_comparison_svg(&BenchmarkDataset::clblast(), &ChartConfig::default()).unwrap();
        for platform in Platform::ALL {
            assert!(svg.contains(platform.display_name()), "{platform}");
        }
        assert!(svg.contains("Before tuning"));
        assert!(svg.contains("After tuning"));
    }

    #[test]
    fn throughput_chart_uses_gflops_axis() {
        let svg = throughput_svg(&BenchmarkDataset::clblast(), &ChartConfig::default()).unwrap();
        assert!(svg.contains(THROUGHPUT_AXIS));
    }

    #[test]
    fn reference_chart_annotates_values() {
        let svg =
            reference_comparison_svg(&BenchmarkDataset::clblast(), &ChartConfig::default()).unwrap();
        assert!(svg.contains("MyGEMM vs CLBlast (1024×1024 matrix)"));
        for value in ["320.0", "490.0", "7.0", "562.2", "403.2", "2.2"] {
            assert!(has_text(&svg, value), "missing annotation {value}");
        }
        assert!(svg.contains("MyGEMM (kernel 11)"));
        assert!(svg.contains(TUNED_LABEL));
    }

    #[test]
    fn speedup_entry_for_starfive() {
        let summary = Summary::derive(&BenchmarkDataset::clblast()).unwrap();
        let (reference, tuned, speedup) = speedup_entry(&summary, Platform::StarFive).unwrap();
        assert_eq!(reference, 490.0);
        assert_eq!(tuned, 403.23);
        assert!((speedup - 1.215).abs() < 0.001);
    }
}
