use image::{Rgb, RgbImage};
use steerage_stats::outliers::BoxStats;

use super::{Chart, Labels, Scale, nice_ticks};
use crate::canvas::{Canvas, colors, interpolate_color};

const BOX_FILL: f64 = 0.6;
const FLIER_RADIUS: i64 = 4;
const FLIER_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Vertical,
    Horizontal,
}

/// One box per group, values on the vertical axis.
#[must_use]
pub fn box_plot<S>(groups: &[(S, BoxStats)], labels: &Labels) -> RgbImage
where
    S: AsRef<str>,
{
    let mut chart = Chart::new(labels);
    let Some((lo, hi)) = value_extent(groups.iter().map(|(_, stats)| stats)) else {
        chart.message("no data");
        return chart.finish();
    };
    let area = chart.area();
    let y = Scale::padded(lo, hi, area.bottom(), area.y);
    chart.y_ticks(&y, &nice_ticks(y.lo(), y.hi(), 6));

    let names = groups.iter().map(|(name, _)| name.as_ref()).collect::<Vec<_>>();
    let slots = chart.x_categories(&names);
    let canvas = chart.canvas();
    for (i, ((center, slot), (_, stats))) in slots.iter().zip(groups).enumerate() {
        draw_box(
            canvas,
            Orientation::Vertical,
            &y,
            *center,
            half_width(*slot),
            stats,
            colors::palette(i),
        );
    }
    chart.finish()
}

/// A single horizontal box, values on the horizontal axis.
#[must_use]
pub fn box_plot_horizontal(stats: Option<&BoxStats>, labels: &Labels) -> RgbImage {
    let mut chart = Chart::new(labels);
    let Some(stats) = stats else {
        chart.message("no data");
        return chart.finish();
    };
    let (lo, hi) = stats.extent();
    let area = chart.area();
    let x = Scale::padded(lo, hi, area.x, area.right());
    chart.x_ticks(&x, &nice_ticks(x.lo(), x.hi(), 6));
    let center = area.y + area.height / 2;
    draw_box(
        chart.canvas(),
        Orientation::Horizontal,
        &x,
        center,
        half_width(area.height),
        stats,
        colors::palette(0),
    );
    chart.finish()
}

fn value_extent<'a, I>(stats: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a BoxStats>,
{
    stats
        .into_iter()
        .map(BoxStats::extent)
        .reduce(|(lo1, hi1), (lo2, hi2)| (lo1.min(lo2), hi1.max(hi2)))
}

#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn half_width(slot: i64) -> i64 {
    ((slot as f64 * BOX_FILL / 2.0) as i64).max(2)
}

/// Draws box, median, whiskers with caps and fliers.
///
/// `center` and `half` are positions across the value axis.
fn draw_box(
    canvas: &mut Canvas,
    orientation: Orientation,
    scale: &Scale,
    center: i64,
    half: i64,
    stats: &BoxStats,
    fill: Rgb<u8>,
) {
    let edge = interpolate_color(fill, colors::BLACK, 0.5);
    // (along value axis, across) -> (x, y)
    let point = |along: i64, across: i64| match orientation {
        Orientation::Vertical => (across, along),
        Orientation::Horizontal => (along, across),
    };
    let segment = |canvas: &mut Canvas, a: (i64, i64), b: (i64, i64)| {
        let (x1, y1) = point(a.0, a.1);
        let (x2, y2) = point(b.0, b.1);
        canvas.line(x1, y1, x2, y2, edge);
    };

    let q1 = scale.map(stats.q1);
    let q3 = scale.map(stats.q3);
    let median = scale.map(stats.median);
    let low = scale.map(stats.whisker_low);
    let high = scale.map(stats.whisker_high);

    let (x1, y1) = point(q1.min(q3), center - half);
    let (x2, y2) = point(q1.max(q3), center + half);
    let (left, top) = (x1.min(x2), y1.min(y2));
    let (width, height) = ((x2 - x1).abs() + 1, (y2 - y1).abs() + 1);
    canvas.fill_rect(left, top, width, height, fill);
    canvas.stroke_rect(left, top, width, height, edge);

    segment(canvas, (median, center - half), (median, center + half));
    segment(canvas, (q1, center), (low, center));
    segment(canvas, (q3, center), (high, center));
    let cap = half / 2;
    segment(canvas, (low, center - cap), (low, center + cap));
    segment(canvas, (high, center - cap), (high, center + cap));

    for &flier in &stats.fliers {
        let (x, y) = point(scale.map(flier), center);
        canvas.circle(x, y, FLIER_RADIUS, FLIER_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[f64]) -> BoxStats {
        BoxStats::new(values.iter().copied(), 1.5).unwrap()
    }

    #[test]
    fn test_vertical_boxes_per_group() {
        let groups = [
            ("0".to_owned(), stats(&[7.25, 8.05, 7.9, 13.0, 26.0, 263.0])),
            ("1".to_owned(), stats(&[71.28, 7.92, 53.1, 11.13, 30.07, 512.33])),
        ];
        let image = box_plot(&groups, &Labels::new("Fare by survival", "survived", "fare"));
        let fill = |i| image.pixels().filter(|p| **p == colors::palette(i)).count();
        assert!(fill(0) > 0);
        assert!(fill(1) > 0);
    }

    #[test]
    fn test_horizontal_box_and_fliers() {
        let stats = stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        assert_eq!(stats.fliers, [100.0]);
        let image = box_plot_horizontal(Some(&stats), &Labels::new("Boxplot", "x", ""));
        assert!(image.pixels().any(|p| *p == FLIER_COLOR), "flier drawn");
        assert!(image.pixels().any(|p| *p == colors::palette(0)));
    }

    #[test]
    fn test_no_data() {
        let image = box_plot_horizontal(None, &Labels::default());
        assert!(!image.pixels().any(|p| *p == colors::palette(0)));
        let groups: [(&str, BoxStats); 0] = [];
        let image = box_plot(&groups, &Labels::default());
        assert!(!image.pixels().any(|p| *p == colors::palette(0)));
    }
}
