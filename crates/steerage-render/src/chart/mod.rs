//! Statistical plots
//!
//! Every plot is drawn onto a fixed-size canvas with a shaded plot area,
//! white grid lines, a title and axis labels, and returned as an image.

mod bars;
mod boxplot;
mod heatmap;

use image::RgbImage;

pub use self::{
    bars::{count_bars, grouped_bars, histogram},
    boxplot::{box_plot, box_plot_horizontal},
    heatmap::heatmap,
};
use crate::{
    canvas::{Align, Canvas, colors, px},
    font,
};

/// Plot image width in pixels.
pub const PLOT_WIDTH: u32 = 800;
/// Plot image height in pixels.
pub const PLOT_HEIGHT: u32 = 600;

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 2;

const MARGIN_LEFT: i64 = 96;
const MARGIN_RIGHT: i64 = 32;
const MARGIN_TOP: i64 = 64;
const MARGIN_BOTTOM: i64 = 72;

/// Title and axis labels of a plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub x: String,
    pub y: String,
}

impl Labels {
    #[must_use]
    pub fn new(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x: x.into(),
            y: y.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn right(self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(self) -> i64 {
        self.y + self.height
    }
}

/// Linear mapping from data values to pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scale {
    lo: f64,
    hi: f64,
    start: f64,
    end: f64,
}

impl Scale {
    /// Maps `[lo, hi]` onto `[start, end]`; `end < start` flips the axis.
    ///
    /// An empty or inverted domain is widened to `lo - 0.5 ..= lo + 0.5`.
    #[expect(clippy::cast_precision_loss)]
    pub fn new(lo: f64, hi: f64, start: i64, end: i64) -> Self {
        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) };
        Self {
            lo,
            hi,
            start: start as f64,
            end: end as f64,
        }
    }

    /// Like [`Scale::new`] with 5% of the range added on both sides.
    pub fn padded(lo: f64, hi: f64, start: i64, end: i64) -> Self {
        let pad = (hi - lo) * 0.05;
        Self::new(lo - pad, hi + pad, start, end)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn map(&self, value: f64) -> i64 {
        px(self.start + (value - self.lo) / (self.hi - self.lo) * (self.end - self.start))
    }
}

/// Tick positions at "nice" steps (1, 2, 2.5 or 5 times a power of ten)
/// covering `[lo, hi]`.
///
/// ```
/// use steerage_render::chart::nice_ticks;
///
/// assert_eq!(nice_ticks(0.0, 80.0, 5), [0.0, 20.0, 40.0, 60.0, 80.0]);
/// assert_eq!(nice_ticks(-1.0, 1.0, 4), [-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return vec![];
    }
    if hi <= lo {
        return vec![lo];
    }
    let step = nice_step(hi - lo, target);
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|n| n as f64 * step).collect()
}

#[expect(clippy::cast_precision_loss)]
fn nice_step(range: f64, target: usize) -> f64 {
    let raw = range / target.max(1) as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = [1.0, 2.0, 2.5, 5.0]
        .into_iter()
        .find(|f| normalized <= f + 1e-9)
        .unwrap_or(10.0);
    factor * magnitude
}

/// Formats a tick value with as many decimals as the tick step needs.
///
/// ```
/// # use steerage_render::chart::format_tick;
/// assert_eq!(format_tick(40.0, &[0.0, 20.0, 40.0]), "40");
/// assert_eq!(format_tick(2.5, &[0.0, 2.5, 5.0]), "2.5");
/// assert_eq!(format_tick(-0.0, &[-0.5, 0.0, 0.5]), "0.0");
/// ```
#[must_use]
pub fn format_tick(value: f64, ticks: &[f64]) -> String {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => value.abs(),
    };
    let decimals = (0..6)
        .find(|&d| {
            let scaled = step * 10_f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6);
    let text = format!("{:.*}", usize::try_from(decimals).unwrap_or(6), value + 0.0);
    if text.starts_with('-') && text.trim_start_matches(['-', '0', '.']).is_empty() {
        text[1..].to_owned()
    } else {
        text
    }
}

/// A plot under construction: canvas plus the shaded plot area.
pub(crate) struct Chart {
    canvas: Canvas,
    area: Rect,
}

impl Chart {
    pub fn new(labels: &Labels) -> Self {
        Self::with_margins(labels, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_BOTTOM)
    }

    pub fn with_margins(labels: &Labels, left: i64, right: i64, bottom: i64) -> Self {
        let mut canvas = Canvas::new(PLOT_WIDTH, PLOT_HEIGHT, colors::WHITE);
        let area = Rect {
            x: left,
            y: MARGIN_TOP,
            width: canvas.width() - left - right,
            height: canvas.height() - MARGIN_TOP - bottom,
        };
        canvas.fill_rect(area.x, area.y, area.width, area.height, colors::PANEL);

        canvas.text(
            canvas.width() / 2,
            20,
            &labels.title,
            TITLE_SCALE,
            Align::Center,
            colors::BLACK,
        );
        canvas.text(
            area.x + area.width / 2,
            area.bottom() + 44,
            &labels.x,
            LABEL_SCALE,
            Align::Center,
            colors::BLACK,
        );
        canvas.text_vertical(24, area.y + area.height / 2, &labels.y, LABEL_SCALE, colors::BLACK);

        Self { canvas, area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Horizontal grid lines and labels for a value axis.
    pub fn y_ticks(&mut self, scale: &Scale, ticks: &[f64]) {
        let text_height = i64::from(font::text_height(TICK_SCALE));
        for &tick in ticks {
            let y = scale.map(tick);
            if y < self.area.y || y > self.area.bottom() {
                continue;
            }
            self.canvas
                .hline(y, self.area.x, self.area.right() - 1, colors::WHITE);
            self.canvas.text(
                self.area.x - 8,
                y - text_height / 2,
                &format_tick(tick, ticks),
                TICK_SCALE,
                Align::End,
                colors::DARK_GRAY,
            );
        }
    }

    /// Vertical grid lines and labels for a value axis.
    pub fn x_ticks(&mut self, scale: &Scale, ticks: &[f64]) {
        for &tick in ticks {
            let x = scale.map(tick);
            if x < self.area.x || x > self.area.right() {
                continue;
            }
            self.canvas
                .vline(x, self.area.y, self.area.bottom() - 1, colors::WHITE);
            self.canvas.text(
                x,
                self.area.bottom() + 10,
                &format_tick(tick, ticks),
                TICK_SCALE,
                Align::Center,
                colors::DARK_GRAY,
            );
        }
    }

    /// Splits the x axis into one slot per category and labels them.
    ///
    /// Returns the center and width of every slot.
    pub fn x_categories<S>(&mut self, labels: &[S]) -> Vec<(i64, i64)>
    where
        S: AsRef<str>,
    {
        let n = i64::try_from(labels.len()).unwrap_or(i64::MAX).max(1);
        let slot = self.area.width / n;
        (0_i64..)
            .zip(labels)
            .map(|(i, label)| {
                let center = self.area.x + slot * i + slot / 2;
                self.canvas.text(
                    center,
                    self.area.bottom() + 10,
                    label.as_ref(),
                    TICK_SCALE,
                    Align::Center,
                    colors::DARK_GRAY,
                );
                (center, slot)
            })
            .collect()
    }

    /// Writes a note in the middle of the plot area.
    pub fn message(&mut self, text: &str) {
        let (cx, cy) = (
            self.area.x + self.area.width / 2,
            self.area.y + self.area.height / 2,
        );
        self.canvas
            .text_centered(cx, cy, text, LABEL_SCALE, colors::DARK_GRAY);
    }

    pub fn finish(self) -> RgbImage {
        self.canvas.into_image()
    }
}

/// Headroom above the largest count so bars never touch the top edge.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn count_axis_max(max_count: u64) -> f64 {
    (max_count.max(1) as f64) * 1.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_endpoints() {
        let scale = Scale::new(0.0, 10.0, 100, 200);
        assert_eq!(scale.map(0.0), 100);
        assert_eq!(scale.map(5.0), 150);
        assert_eq!(scale.map(10.0), 200);

        let flipped = Scale::new(0.0, 10.0, 200, 100);
        assert_eq!(flipped.map(10.0), 100);
    }

    #[test]
    fn test_degenerate_scale_is_widened() {
        let scale = Scale::new(3.0, 3.0, 0, 100);
        assert_eq!(scale.map(3.0), 50);
        assert!((scale.lo() - 2.5).abs() < 1e-12);
        assert!((scale.hi() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.42, 80.0, 5), [20.0, 40.0, 60.0, 80.0]);
        assert_eq!(nice_ticks(0.0, 512.33, 5), [0.0, 200.0, 400.0]);
        assert_eq!(nice_ticks(1.0, 1.0, 5), [1.0]);
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
    }

    #[test]
    fn test_chart_has_shaded_area() {
        let chart = Chart::new(&Labels::new("T", "x", "y"));
        let area = chart.area();
        let image = chart.finish();
        assert_eq!((image.width(), image.height()), (PLOT_WIDTH, PLOT_HEIGHT));
        let probe = image.get_pixel(
            u32::try_from(area.x + 5).unwrap(),
            u32::try_from(area.y + 5).unwrap(),
        );
        assert_eq!(*probe, colors::PANEL);
    }
}
