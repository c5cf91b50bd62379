//! Labelled report tables
//!
//! A [`ReportFrame`] is a small grid of [`Cell`]s with row and column labels.
//! Every inspection step produces one; the console printer and the image
//! renderer both consume it.

use std::fmt;

use crate::column::Cell;

/// A labelled table of report cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFrame {
    /// Row labels.
    pub index: Vec<String>,
    /// Column labels.
    pub columns: Vec<String>,
    /// Cells, one inner vector per row, each as long as `columns`.
    pub rows: Vec<Vec<Cell>>,
}

impl ReportFrame {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index: vec![],
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    /// Builds a one-column frame from labelled values.
    ///
    /// ```
    /// use steerage_table::report::ReportFrame;
    ///
    /// let frame = ReportFrame::from_series("value", [("rows", 891_usize), ("cols", 8)]);
    /// assert_eq!(frame.shape(), (2, 1));
    /// assert_eq!(frame.index, ["rows", "cols"]);
    /// ```
    #[must_use]
    pub fn from_series<I, L, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: fmt::Display,
        V: Into<Cell>,
    {
        let mut frame = Self::new([name]);
        for (label, value) in values {
            frame.push_row(label, vec![value.into()]);
        }
        frame
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if the row length differs from the number of columns.
    pub fn push_row<L>(&mut self, label: L, cells: Vec<Cell>)
    where
        L: fmt::Display,
    {
        assert_eq!(
            cells.len(),
            self.columns.len(),
            "row length must match column count"
        );
        self.index.push(label.to_string());
        self.rows.push(cells);
    }

    /// (rows, columns)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a copy with every floating-point cell rounded to `ndigits`.
    #[must_use]
    pub fn rounded(&self, ndigits: u32) -> Self {
        Self {
            index: self.index.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.rounded(ndigits)).collect())
                .collect(),
        }
    }

    /// Returns the first `max_rows` rows and whether anything was cut.
    #[must_use]
    pub fn truncated(&self, max_rows: usize) -> (Self, bool) {
        if self.rows.len() <= max_rows {
            return (self.clone(), false);
        }
        let frame = Self {
            index: self.index[..max_rows].to_vec(),
            columns: self.columns.clone(),
            rows: self.rows[..max_rows].to_vec(),
        };
        (frame, true)
    }

    /// Cell text in a fixed grid: header line first, labels in column 0.
    #[must_use]
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(
            std::iter::once(String::new())
                .chain(self.columns.iter().cloned())
                .collect(),
        );
        for (label, row) in self.index.iter().zip(&self.rows) {
            grid.push(
                std::iter::once(label.clone())
                    .chain(row.iter().map(ToString::to_string))
                    .collect(),
            );
        }
        grid
    }
}

/// Console rendering: labels left-aligned, cells right-aligned.
impl fmt::Display for ReportFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.text_grid();
        let ncols = self.columns.len() + 1;
        let widths = (0..ncols)
            .map(|j| {
                grid.iter()
                    .map(|row| row[j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        for (i, row) in grid.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<width$}", row[0], width = widths[0])?;
            for (cell, width) in row.iter().zip(&widths).skip(1) {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportFrame {
        let mut frame = ReportFrame::new(["count", "mean"]);
        frame.push_row("age", vec![Cell::Int(714), Cell::Float(29.699_118)]);
        frame.push_row("fare", vec![Cell::Int(891), Cell::Float(32.204_208)]);
        frame
    }

    #[test]
    fn test_rounded_keeps_labels() {
        let frame = sample().rounded(2);
        assert_eq!(frame.index, ["age", "fare"]);
        assert_eq!(frame.rows[0][1], Cell::Float(29.7));
        assert_eq!(frame.rows[1][1], Cell::Float(32.2));
    }

    #[test]
    fn test_truncated() {
        let (frame, cut) = sample().truncated(1);
        assert!(cut);
        assert_eq!(frame.shape(), (1, 2));
        let (frame, cut) = sample().truncated(5);
        assert!(!cut);
        assert_eq!(frame.shape(), (2, 2));
    }

    #[test]
    fn test_display_aligns_columns() {
        let text = sample().rounded(1).to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "      count  mean");
        assert_eq!(lines[1], "age     714  29.7");
        assert_eq!(lines[2], "fare    891  32.2");
    }
}
