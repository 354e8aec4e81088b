//! Console rendering of the benchmark summary

pub mod table;

pub use table::{Align, TableBuilder};

use std::io::{self, Write};

use gemm_report_core::{Platform, Summary};

use crate::report::speedup_entry;

/// Write the per-platform table followed by the reference speed-up block
/// for `speedup_platform`.
///
/// Output depends only on `summary` and the flags, so repeated calls
/// produce identical bytes.
///
/// # Errors
///
/// Propagates write failures from `writer`.
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &Summary,
    speedup_platform: Platform,
    use_color: bool,
) -> io::Result<()> {
    let size = summary.size;
    writeln!(writer)?;
    writeln!(writer, "=== CLBlast results for {size}×{size} ===")?;
    writeln!(writer)?;

    let headers = [
        "Platform",
        "Before (ms)",
        "After (ms)",
        "Change",
        "Before (GFLOPS)",
        "After (GFLOPS)",
    ];
    let mut table = (1..headers.len()).fold(
        TableBuilder::new(headers.map(String::from).to_vec()).with_color(use_color),
        |table, column| table.with_alignment(column, Align::Right),
    );

    for entry in &summary.platforms {
        table.add_row(vec![
            entry.platform.display_name().to_string(),
            format!("{:.2}", entry.before_ms),
            format!("{:.2}", entry.after_ms),
            entry.change_label(),
            format!("{:.2}", entry.before_gflops),
            format!("{:.2}", entry.after_gflops),
        ]);
    }
    table.render(writer)?;

    writeln!(writer)?;
    writeln!(
        writer,
        "=== Comparison with {} for {size}×{size} ===",
        summary.reference_kernel
    )?;
    writeln!(writer)?;
    writeln!(writer, "{}:", speedup_platform.display_name())?;
    match speedup_entry(summary, speedup_platform) {
        Some((reference_ms, tuned_ms, speedup)) => {
            writeln!(writer, "  Reference: {reference_ms:>8.2} ms")?;
            writeln!(writer, "  CLBlast:   {tuned_ms:>8.2} ms")?;
            writeln!(writer, "  Speed-up:  {speedup:>8.2}x")?;
        }
        None => {
            writeln!(writer, "  no reference measurement")?;
        }
    }
    Ok(())
}
