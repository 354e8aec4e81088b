//! Box-drawing table formatting for console output

#![allow(missing_docs)]

use std::io::{IsTerminal, Write};

/// Horizontal placement of cell text within its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Box-drawing table. Every column is left-aligned unless set otherwise
/// with [`TableBuilder::with_alignment`]; headers are always left-aligned.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    alignments: Vec<Align>,
    use_color: bool,
}

impl TableBuilder {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        let column_widths = headers.iter().map(|h| h.chars().count()).collect();
        let alignments = vec![Align::Left; headers.len()];

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            alignments,
            use_color: false,
        }
    }

    /// Enable bold cyan headers
    #[must_use]
    pub const fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Set the alignment of body cells in `column`; out-of-range columns
    /// are ignored.
    #[must_use]
    pub fn with_alignment(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.alignments.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// True when stdout is an interactive terminal
    #[must_use]
    pub fn stdout_supports_color() -> bool {
        std::io::stdout().is_terminal()
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = self.column_widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
        self.rows.push(row);
    }

    pub fn render<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.write_border(writer, '┌', '┬', '┐')?;
        self.write_row(writer, &self.headers, true)?;
        self.write_border(writer, '├', '┼', '┤')?;

        for row in &self.rows {
            self.write_row(writer, row, false)?;
        }

        self.write_border(writer, '└', '┴', '┘')
    }

    fn write_border<W: Write>(
        &self,
        writer: &mut W,
        left: char,
        mid: char,
        right: char,
    ) -> std::io::Result<()> {
        write!(writer, "{left}")?;
        for (i, width) in self.column_widths.iter().enumerate() {
            write!(writer, "{}", "─".repeat(width + 2))?;
            if i + 1 < self.column_widths.len() {
                write!(writer, "{mid}")?;
            }
        }
        writeln!(writer, "{right}")
    }

    fn write_row<W: Write>(
        &self,
        writer: &mut W,
        cells: &[String],
        is_header: bool,
    ) -> std::io::Result<()> {
        write!(writer, "│")?;
        for (i, (width, align)) in self.column_widths.iter().zip(&self.alignments).enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            if is_header && self.use_color {
                write!(writer, " \x1b[1;36m{cell:<width$}\x1b[0m │")?;
            } else if !is_header && *align == Align::Right {
                write!(writer, " {cell:>width$} │")?;
            } else {
                write!(writer, " {cell:<width$} │")?;
            }
        }
        writeln!(writer)
    }
}
