//! Grouped bar panels drawn with plotters
//!
//! Every chart in the report is one or more panels of paired bars: one
//! category per matrix size (or platform), the first bar of each pair in
//! steel blue and the second in light coral. [`render_grouped_bar_panel`]
//! draws such a panel on any drawing area with either a linear or a
//! logarithmic value axis; [`render_svg`] wraps a drawing into an SVG
//! document held in memory.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::ChartConfig;
use crate::error::{CliError, CliResult};

/// Fill for "before tuning" and reference bars (steel blue)
pub const FIRST_COLOR: RGBColor = RGBColor(70, 130, 180);
/// Fill for "after tuning" and tuned bars (light coral)
pub const SECOND_COLOR: RGBColor = RGBColor(240, 128, 128);

const BAR_OPACITY: f64 = 0.8;
const BAR_WIDTH: f64 = 0.35;
const FONT: &str = "sans-serif";

/// Value axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Starts at zero
    Linear,
    /// Base-10 logarithmic, for values spanning several orders of magnitude
    Log,
}

/// Data and labels for one grouped bar panel
#[derive(Debug, Clone)]
pub struct BarPanel<'a> {
    /// Caption above the plot
    pub title: &'a str,
    /// Category axis description
    pub x_desc: &'a str,
    /// Value axis description
    pub y_desc: &'a str,
    /// One label per bar pair
    pub categories: Vec<String>,
    /// Left bar of each pair
    pub first: &'a [f64],
    /// Right bar of each pair
    pub second: &'a [f64],
    /// Legend entry for `first`
    pub first_label: &'a str,
    /// Legend entry for `second`
    pub second_label: &'a str,
    /// Print each bar's value above it
    pub annotate: bool,
}

impl BarPanel<'_> {
    fn check(&self, scale: Scale) -> CliResult<()> {
        let n = self.categories.len();
        if n == 0 || self.first.len() != n || self.second.len() != n {
            return Err(CliError::render(
                self.title,
                format!(
                    "expected {n} values per series, got {} and {}",
                    self.first.len(),
                    self.second.len()
                ),
            ));
        }
        let valid = |v: f64| match scale {
            Scale::Linear => v.is_finite() && v >= 0.0,
            Scale::Log => v.is_finite() && v > 0.0,
        };
        if let Some(bad) = self.values().find(|&v| !valid(v)) {
            return Err(CliError::render(
                self.title,
                format!("value {bad} cannot be drawn on a {scale:?} axis"),
            ));
        }
        Ok(())
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.first.iter().chain(self.second).copied()
    }

    /// Value axis bounds with headroom for the legend and annotations
    fn bounds(&self, scale: Scale) -> (f64, f64) {
        let max = self.values().fold(f64::MIN_POSITIVE, f64::max);
        match scale {
            Scale::Linear => (0.0, max * 1.15),
            Scale::Log => {
                let min = self.values().fold(f64::MAX, f64::min);
                (min / 2.0, max * 4.0)
            }
        }
    }
}

/// Draw `panel` onto `area`.
///
/// # Errors
///
/// Returns [`CliError::Render`] if the series are ragged, contain values
/// the scale cannot show, or the backend fails.
pub fn render_grouped_bar_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &BarPanel<'_>,
    scale: Scale,
    style: &ChartConfig,
) -> CliResult<()> {
    panel.check(scale)?;
    let (low, high) = panel.bounds(scale);
    match scale {
        Scale::Linear => draw_panel(area, panel, low..high, low, style),
        Scale::Log => draw_panel(area, panel, (low..high).log_scale(), low, style),
    }
    .map_err(|e| CliError::render(panel.title, e))
}

fn draw_panel<DB, Y>(
    area: &DrawingArea<DB, Shift>,
    panel: &BarPanel<'_>,
    y_spec: Y,
    baseline: f64,
    style: &ChartConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let n = panel.categories.len();
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, style.title_font_size))
        .margin(15)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_spec)?;

    let categories = &panel.categories;
    let x_formatter = |x: &f64| category_label(categories, *x);
    let y_formatter = |y: &f64| format_tick(*y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.3))
        .x_labels(n)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .label_style((FONT, style.tick_font_size))
        .axis_desc_style((FONT, style.axis_font_size))
        .draw()?;

    let pairs = [
        (panel.first, panel.first_label, FIRST_COLOR, -BAR_WIDTH / 2.0),
        (panel.second, panel.second_label, SECOND_COLOR, BAR_WIDTH / 2.0),
    ];

    for (values, label, color, offset) in pairs {
        let fill = color.mix(BAR_OPACITY).filled();
        chart
            .draw_series(values.iter().enumerate().map(|(i, &value)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [
                        (center - BAR_WIDTH / 2.0, baseline),
                        (center + BAR_WIDTH / 2.0, value),
                    ],
                    fill,
                )
            }))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));

        if panel.annotate {
            let text_style = (FONT, style.annotation_font_size)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(values.iter().enumerate().map(|(i, &value)| {
                Text::new(
                    format!("{value:.1}"),
                    (i as f64 + offset, value),
                    text_style.clone(),
                )
            }))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, style.legend_font_size))
        .draw()?;

    Ok(())
}

/// Render a drawing into an in-memory SVG document of `size` pixels.
///
/// # Errors
///
/// Propagates errors from `draw` and maps backend failures to
/// [`CliError::Render`] tagged with `name`.
pub fn render_svg<F>(name: &str, size: (u32, u32), draw: F) -> CliResult<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> CliResult<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| CliError::render(name, e))?;
        draw(&root)?;
        root.present().map_err(|e| CliError::render(name, e))?;
    }
    Ok(svg)
}

fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 || value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}
