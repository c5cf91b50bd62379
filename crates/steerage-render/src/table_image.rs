//! Report frames rendered as table images
//!
//! The figure size follows the cell grid: each column (the label column
//! included) is `col_width` inches wide and each row `row_height` inches tall,
//! with two extra rows for the title and header, never smaller than 6 x 2.5
//! inches. Text that does not fit widens the image.

use image::RgbImage;
use steerage_table::report::ReportFrame;

use crate::{
    canvas::{Align, Canvas, colors, px},
    font,
};

/// Raster scale of table figures.
pub const PIXELS_PER_INCH: f64 = 100.0;

const MIN_WIDTH_INCHES: f64 = 6.0;
const MIN_HEIGHT_INCHES: f64 = 2.5;
const TEXT_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 2;
const CELL_PADDING: i64 = 12;
const ROW_PIXELS: i64 = 30;
const MARGIN: i64 = 16;

/// How a frame is prepared and laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    /// Decimal places for floating-point cells; `None` keeps full precision.
    pub round_ndigits: Option<u32>,
    /// Row cap; longer frames are truncated and the title says so.
    pub max_rows: Option<usize>,
    /// Inches per column.
    pub col_width: f64,
    /// Inches per row.
    pub row_height: f64,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            round_ndigits: Some(2),
            max_rows: Some(30),
            col_width: 2.2,
            row_height: 0.6,
        }
    }
}

impl TableStyle {
    /// The same style without rounding.
    #[must_use]
    pub fn unrounded(self) -> Self {
        Self {
            round_ndigits: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_max_rows(self, max_rows: Option<usize>) -> Self {
        Self { max_rows, ..self }
    }

    /// Figure size in inches for a frame of `rows` x `cols` cells.
    ///
    /// ```
    /// use steerage_render::table_image::TableStyle;
    ///
    /// let style = TableStyle::default();
    /// assert_eq!(style.figure_size(2, 1), (6.0, 2.5));
    /// let (w, h) = style.figure_size(30, 8);
    /// assert!((w - 19.8).abs() < 1e-9 && (h - 19.2).abs() < 1e-9);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn figure_size(&self, rows: usize, cols: usize) -> (f64, f64) {
        let width = (self.col_width * (cols + 1) as f64).max(MIN_WIDTH_INCHES);
        let height = (self.row_height * (rows + 2) as f64).max(MIN_HEIGHT_INCHES);
        (width, height)
    }

    /// Rounds and truncates a frame. Returns the frame and the row count it
    /// was truncated to, if it was.
    #[must_use]
    pub fn prepare(&self, frame: &ReportFrame) -> (ReportFrame, Option<usize>) {
        let rounded = match self.round_ndigits {
            Some(ndigits) => frame.rounded(ndigits),
            None => frame.clone(),
        };
        match self.max_rows {
            Some(max_rows) => {
                let (frame, cut) = rounded.truncated(max_rows);
                (frame, cut.then_some(max_rows))
            }
            None => (rounded, None),
        }
    }
}

/// Appends the truncation note to a title.
///
/// ```
/// # use steerage_render::table_image::title_with_note;
/// assert_eq!(title_with_note("Nulls", None), "Nulls");
/// assert_eq!(title_with_note("Head", Some(30)), "Head (truncated to 30 rows)");
/// ```
#[must_use]
pub fn title_with_note(title: &str, truncated_to: Option<usize>) -> String {
    match truncated_to {
        Some(rows) => format!("{title} (truncated to {rows} rows)"),
        None => title.to_owned(),
    }
}

/// Renders `frame` as a table image with an optional title.
#[must_use]
pub fn render_table(frame: &ReportFrame, title: Option<&str>, style: &TableStyle) -> RgbImage {
    let (frame, truncated_to) = style.prepare(frame);
    let grid = frame.text_grid();
    let (rows, cols) = frame.shape();

    let (width_in, height_in) = style.figure_size(rows, cols);
    let natural_widths = (0..=cols)
        .map(|j| {
            grid.iter()
                .map(|row| i64::from(font::text_width(&row[j], TEXT_SCALE)))
                .max()
                .unwrap_or(0)
                + 2 * CELL_PADDING
        })
        .collect::<Vec<_>>();
    let natural_total = natural_widths.iter().sum::<i64>();

    let figure_width = px(width_in * PIXELS_PER_INCH).max(natural_total + 2 * MARGIN);
    let title_height = if title.is_some() { 40 } else { 0 };
    let table_height = ROW_PIXELS * i64::try_from(grid.len()).unwrap_or(i64::MAX);
    let figure_height =
        px(height_in * PIXELS_PER_INCH).max(table_height + title_height + 2 * MARGIN);

    // spare width is spread evenly across columns
    let spare = (figure_width - 2 * MARGIN - natural_total).max(0);
    let ncols = i64::try_from(natural_widths.len()).unwrap_or(1).max(1);
    let widths = natural_widths
        .iter()
        .map(|w| w + spare / ncols)
        .collect::<Vec<_>>();
    let table_width = widths.iter().sum::<i64>();

    let mut canvas = Canvas::new(
        u32::try_from(figure_width).unwrap_or(u32::MAX),
        u32::try_from(figure_height).unwrap_or(u32::MAX),
        colors::WHITE,
    );

    if let Some(title) = title {
        let title = title_with_note(title, truncated_to);
        canvas.text(
            figure_width / 2,
            MARGIN,
            &title,
            TITLE_SCALE,
            Align::Center,
            colors::BLACK,
        );
    }

    let left = (figure_width - table_width) / 2;
    let top =
        title_height + MARGIN + (figure_height - title_height - 2 * MARGIN - table_height) / 2;
    let text_height = i64::from(font::text_height(TEXT_SCALE));

    for (i, row) in (0_i64..).zip(&grid) {
        let y = top + i * ROW_PIXELS;
        let mut x = left;
        for (j, (text, width)) in row.iter().zip(&widths).enumerate() {
            let is_label = i == 0 || j == 0;
            // top-left corner stays blank
            if i == 0 && j == 0 {
                x += width;
                continue;
            }
            if is_label {
                canvas.fill_rect(x, y, *width, ROW_PIXELS, colors::HEADER);
            }
            canvas.stroke_rect(x, y, *width + 1, ROW_PIXELS + 1, colors::DARK_GRAY);
            canvas.text(
                x + width / 2,
                y + (ROW_PIXELS - text_height) / 2,
                text,
                TEXT_SCALE,
                Align::Center,
                colors::BLACK,
            );
            x += width;
        }
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use steerage_table::column::Cell;

    use super::*;

    fn frame(rows: usize) -> ReportFrame {
        let mut frame = ReportFrame::new(["value"]);
        for i in 0..rows {
            frame.push_row(i, vec![Cell::Float(0.123_456)]);
        }
        frame
    }

    #[test]
    fn test_small_frames_use_minimum_size() {
        let image = render_table(&frame(2), Some("Shape"), &TableStyle::default());
        assert_eq!((image.width(), image.height()), (600, 250));
    }

    #[test]
    fn test_size_grows_with_rows() {
        let image = render_table(&frame(10), None, &TableStyle::default());
        assert_eq!(image.height(), 720, "0.6 * (10 + 2) inches");
    }

    #[test]
    fn test_prepare_rounds_and_truncates() {
        let style = TableStyle::default().with_max_rows(Some(3));
        let (prepared, truncated_to) = style.prepare(&frame(5));
        assert_eq!(prepared.shape(), (3, 1));
        assert_eq!(truncated_to, Some(3));
        assert_eq!(prepared.rows[0][0], Cell::Float(0.12));

        let (prepared, truncated_to) = style.unrounded().with_max_rows(None).prepare(&frame(5));
        assert_eq!(prepared.shape(), (5, 1));
        assert_eq!(truncated_to, None);
        assert_eq!(prepared.rows[0][0], Cell::Float(0.123_456));
    }

    #[test]
    fn test_truncated_image_is_capped() {
        let image = render_table(&frame(100), Some("Head"), &TableStyle::default());
        assert_eq!(image.height(), 1920, "0.6 * (30 + 2) inches");
    }

    #[test]
    fn test_wide_text_widens_image() {
        let mut frame = ReportFrame::new(["text"]);
        frame.push_row(0, vec![Cell::from("x".repeat(80).as_str())]);
        let image = render_table(&frame, None, &TableStyle::default());
        assert!(image.width() > 600);
    }
}
