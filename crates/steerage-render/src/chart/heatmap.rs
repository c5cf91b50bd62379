use image::RgbImage;
use steerage_stats::correlation::CorrelationMatrix;

use super::{PLOT_HEIGHT, PLOT_WIDTH};
use crate::{
    canvas::{Align, Canvas, colors, contrast_color, diverging_color, px},
    font,
};

const LABEL_SCALE: u32 = 2;
const COLORBAR_WIDTH: i64 = 20;
const COLORBAR_TICKS: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

/// Annotated correlation heatmap on a fixed `[-1, 1]` color scale.
///
/// Cells whose coefficient is undefined (NaN) are left blank.
#[must_use]
pub fn heatmap(matrix: &CorrelationMatrix, title: &str) -> RgbImage {
    let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT, colors::WHITE);
    canvas.text(canvas.width() / 2, 20, title, 3, Align::Center, colors::BLACK);
    if matrix.is_empty() {
        canvas.text_centered(
            canvas.width() / 2,
            canvas.height() / 2,
            "no numeric columns",
            LABEL_SCALE,
            colors::DARK_GRAY,
        );
        return canvas.into_image();
    }

    let longest_label = matrix
        .names
        .iter()
        .map(|name| i64::from(font::text_width(name, LABEL_SCALE)))
        .max()
        .unwrap_or(0);
    let left = longest_label + 24;
    let bottom = longest_label + 24;
    let top = 64;
    let right = COLORBAR_WIDTH + 80;

    let n = i64::try_from(matrix.len()).unwrap_or(i64::MAX);
    let cell = ((canvas.width() - left - right) / n)
        .min((canvas.height() - top - bottom) / n)
        .max(1);
    let grid_bottom = top + cell * n;
    let annotation_scale = if cell >= 64 { 2 } else { 1 };

    for (i, (name, row)) in (0_i64..).zip(matrix.names.iter().zip(&matrix.values)) {
        let y = top + i * cell;
        for (j, value) in (0_i64..).zip(row) {
            let x = left + j * cell;
            if value.is_nan() {
                canvas.fill_rect(x, y, cell, cell, colors::WHITE);
                continue;
            }
            let fill = diverging_color(*value);
            canvas.fill_rect(x, y, cell, cell, fill);
            canvas.text_centered(
                x + cell / 2,
                y + cell / 2,
                &format!("{value:.2}"),
                annotation_scale,
                contrast_color(fill),
            );
        }
        // row label on the left, column label below
        canvas.text(
            left - 8,
            y + (cell - i64::from(font::text_height(LABEL_SCALE))) / 2,
            name,
            LABEL_SCALE,
            Align::End,
            colors::BLACK,
        );
        let label_width = i64::from(font::text_width(name, LABEL_SCALE));
        canvas.text_vertical(
            left + i * cell + cell / 2,
            grid_bottom + 8 + label_width / 2,
            name,
            LABEL_SCALE,
            colors::BLACK,
        );
    }
    for k in 1..n {
        canvas.hline(top + k * cell, left, left + n * cell - 1, colors::WHITE);
        canvas.vline(left + k * cell, top, grid_bottom - 1, colors::WHITE);
    }

    draw_colorbar(&mut canvas, left + n * cell + 24, top, grid_bottom - top);
    canvas.into_image()
}

#[expect(clippy::cast_precision_loss)]
fn draw_colorbar(canvas: &mut Canvas, x: i64, top: i64, height: i64) {
    if height <= 1 {
        return;
    }
    for dy in 0..height {
        let value = 1.0 - 2.0 * dy as f64 / (height - 1) as f64;
        canvas.hline(top + dy, x, x + COLORBAR_WIDTH - 1, diverging_color(value));
    }
    canvas.stroke_rect(x, top, COLORBAR_WIDTH, height, colors::DARK_GRAY);
    let text_height = i64::from(font::text_height(LABEL_SCALE));
    for tick in COLORBAR_TICKS {
        let dy = px((1.0 - tick) / 2.0 * (height - 1) as f64);
        canvas.hline(top + dy, x + COLORBAR_WIDTH, x + COLORBAR_WIDTH + 4, colors::DARK_GRAY);
        canvas.text(
            x + COLORBAR_WIDTH + 8,
            top + dy - text_height / 2,
            &format!("{tick:.1}"),
            LABEL_SCALE,
            Align::Start,
            colors::DARK_GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> CorrelationMatrix {
        let col = |v: &[f64]| v.iter().copied().map(Some).collect::<Vec<_>>();
        CorrelationMatrix::new(&[
            ("survived".to_owned(), col(&[0.0, 1.0, 1.0, 1.0, 0.0])),
            ("fare".to_owned(), col(&[7.25, 71.28, 7.92, 53.1, 8.05])),
            ("pclass".to_owned(), col(&[3.0, 1.0, 3.0, 1.0, 3.0])),
        ])
    }

    #[test]
    fn test_diagonal_uses_top_of_scale() {
        let image = heatmap(&matrix(), "Correlation matrix");
        assert!(
            image.pixels().any(|p| *p == colors::DIVERGING_HIGH),
            "diagonal cells are +1"
        );
    }

    #[test]
    fn test_nan_cells_are_blank() {
        let col = |v: &[f64]| v.iter().copied().map(Some).collect::<Vec<_>>();
        let matrix = CorrelationMatrix::new(&[
            ("a".to_owned(), col(&[1.0, 1.0, 1.0])),
            ("b".to_owned(), col(&[1.0, 2.0, 3.0])),
        ]);
        assert!(matrix.values[0][0].is_nan());
        let image = heatmap(&matrix, "constant column");
        assert_eq!((image.width(), image.height()), (PLOT_WIDTH, PLOT_HEIGHT));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = CorrelationMatrix::new(&[]);
        assert!(matrix.is_empty());
        let image = heatmap(&matrix, "empty");
        assert!(!image.pixels().any(|p| *p == colors::DIVERGING_HIGH));
    }
}
