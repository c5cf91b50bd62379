use image::RgbImage;
use steerage_stats::histogram::Histogram;

use super::{Chart, Labels, Scale, count_axis_max, nice_ticks};
use crate::{
    canvas::{Align, colors, interpolate_color},
    font,
};

const BAR_FILL: f64 = 0.8;

/// Histogram of pre-binned values, bars touching.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn histogram(histogram: &Histogram, labels: &Labels) -> RgbImage {
    let mut chart = Chart::new(labels);
    let area = chart.area();
    let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) else {
        chart.message("no data");
        return chart.finish();
    };

    let x = Scale::padded(first.range.start, last.range.end, area.x, area.right());
    let y_max = count_axis_max(histogram.max_count());
    let y = Scale::new(0.0, y_max, area.bottom(), area.y);
    chart.y_ticks(&y, &nice_ticks(0.0, y_max, 5));
    chart.x_ticks(&x, &nice_ticks(x.lo(), x.hi(), 6));

    let fill = colors::palette(0);
    let edge = interpolate_color(fill, colors::BLACK, 0.4);
    let canvas = chart.canvas();
    for bin in &histogram.bins {
        let left = x.map(bin.range.start);
        let right = x.map(bin.range.end);
        let top = y.map(bin.count as f64);
        let height = area.bottom() - top;
        if bin.count == 0 || height <= 0 {
            continue;
        }
        canvas.fill_rect(left, top, (right - left).max(1), height, fill);
        canvas.stroke_rect(left, top, (right - left).max(1) + 1, height, edge);
    }
    chart.finish()
}

/// One bar per category, heights given by `counts`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn count_bars<S>(counts: &[(S, u64)], labels: &Labels) -> RgbImage
where
    S: AsRef<str>,
{
    let mut chart = Chart::new(labels);
    if counts.is_empty() {
        chart.message("no data");
        return chart.finish();
    }
    let area = chart.area();
    let y_max = count_axis_max(counts.iter().map(|(_, c)| *c).max().unwrap_or(0));
    let y = Scale::new(0.0, y_max, area.bottom(), area.y);
    chart.y_ticks(&y, &nice_ticks(0.0, y_max, 5));

    let names = counts.iter().map(|(name, _)| name.as_ref()).collect::<Vec<_>>();
    let slots = chart.x_categories(&names);
    let canvas = chart.canvas();
    for (i, ((center, slot), (_, count))) in slots.iter().zip(counts).enumerate() {
        let width = bar_width(*slot, BAR_FILL);
        let top = y.map(*count as f64);
        canvas.fill_rect(
            center - width / 2,
            top,
            width,
            area.bottom() - top,
            colors::palette(i),
        );
    }
    chart.finish()
}

/// Counts of `hues` within each of `groups`, drawn side by side with a legend.
///
/// `counts[g][h]` is the count of hue `h` in group `g`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn grouped_bars<G, H>(
    groups: &[G],
    hues: &[H],
    counts: &[Vec<u64>],
    hue_title: &str,
    labels: &Labels,
) -> RgbImage
where
    G: AsRef<str>,
    H: AsRef<str>,
{
    let mut chart = Chart::new(labels);
    if groups.is_empty() || hues.is_empty() {
        chart.message("no data");
        return chart.finish();
    }
    let area = chart.area();
    let max_count = counts.iter().flatten().copied().max().unwrap_or(0);
    let y_max = count_axis_max(max_count);
    let y = Scale::new(0.0, y_max, area.bottom(), area.y);
    chart.y_ticks(&y, &nice_ticks(0.0, y_max, 5));

    let slots = chart.x_categories(groups);
    let n_hues = i64::try_from(hues.len()).unwrap_or(i64::MAX);
    let canvas = chart.canvas();
    for ((center, slot), row) in slots.iter().zip(counts) {
        let group_width = bar_width(*slot, BAR_FILL);
        let width = (group_width / n_hues).max(1);
        let left = center - group_width / 2;
        for (h, count) in (0_i64..).zip(row) {
            let top = y.map(*count as f64);
            canvas.fill_rect(
                left + h * width,
                top,
                width,
                area.bottom() - top,
                colors::palette(usize::try_from(h).unwrap_or(0)),
            );
        }
    }

    // legend, top right inside the plot area
    let scale = 2;
    let line = i64::from(font::text_height(scale)) + 8;
    let widest = hues
        .iter()
        .map(|h| font::text_width(h.as_ref(), scale))
        .chain([font::text_width(hue_title, scale)])
        .max()
        .unwrap_or(0);
    let box_width = i64::from(widest) + 48;
    let box_height = line * (n_hues + 1) + 8;
    let left = area.right() - box_width - 10;
    let top = area.y + 10;
    canvas.fill_rect(left, top, box_width, box_height, colors::WHITE);
    canvas.stroke_rect(left, top, box_width, box_height, colors::GRID);
    canvas.text(left + 8, top + 8, hue_title, scale, Align::Start, colors::BLACK);
    for (h, hue) in (1_i64..).zip(hues) {
        let row_y = top + 8 + h * line;
        let swatch = colors::palette(usize::try_from(h - 1).unwrap_or(0));
        canvas.fill_rect(left + 8, row_y, 20, i64::from(font::text_height(scale)), swatch);
        canvas.text(left + 36, row_y, hue.as_ref(), scale, Align::Start, colors::BLACK);
    }
    chart.finish()
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn bar_width(slot: i64, fill: f64) -> i64 {
    ((slot as f64 * fill) as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PLOT_HEIGHT, PLOT_WIDTH};

    fn labels() -> Labels {
        Labels::new("Title", "x", "count")
    }

    fn count_color(image: &RgbImage, color: image::Rgb<u8>) -> usize {
        image.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_histogram_draws_bars() {
        let hist = Histogram::new([1.0, 2.0, 2.0, 3.0, 10.0], 30);
        let image = histogram(&hist, &labels());
        assert_eq!((image.width(), image.height()), (PLOT_WIDTH, PLOT_HEIGHT));
        assert!(count_color(&image, colors::palette(0)) > 0);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::new(Vec::<f64>::new(), 30);
        let image = histogram(&hist, &labels());
        assert_eq!(count_color(&image, colors::palette(0)), 0);
    }

    #[test]
    fn test_taller_bar_has_more_pixels() {
        let image = count_bars(&[("0", 549), ("1", 342)], &labels());
        let first = count_color(&image, colors::palette(0));
        let second = count_color(&image, colors::palette(1));
        assert!(first > second && second > 0, "{first} vs {second}");
    }

    #[test]
    fn test_grouped_bars_use_one_color_per_hue() {
        let image = grouped_bars(
            &["female", "male"],
            &["0", "1"],
            &[vec![81, 233], vec![468, 109]],
            "survived",
            &labels(),
        );
        assert!(count_color(&image, colors::palette(0)) > 0);
        assert!(count_color(&image, colors::palette(1)) > 0);
        assert_eq!(count_color(&image, colors::palette(2)), 0);
    }
}
