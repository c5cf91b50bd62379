use std::ops::Range;

use crate::percentiles;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is divided into equal-width bins. Every bin is
/// half-open except the last one, which also includes `max`, so each finite
/// value lands in exactly one bin.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end,
    /// except for the last bin).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// NaN values are skipped. When all values are equal the histogram spans
    /// `[v - 0.5, v + 0.5]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use steerage_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.0, 3.0, 4.0];
    /// let histogram = Histogram::new(values, 3);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 2]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted = percentiles::sorted_finite(values);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let (min, max) = if last - first < f64::EPSILON {
            (first - 0.5, last + 0.5)
        } else {
            (first, last)
        };
        let width = (max - min) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|idx| {
                // Recompute each edge from `min` to avoid accumulating rounding errors
                let start = min + width * idx as f64;
                let end = if idx + 1 == num_bins {
                    max
                } else {
                    min + width * (idx + 1) as f64
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &value in sorted_values {
            let idx = (((value - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Largest bin count, or zero for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(Histogram::new(Vec::<f64>::new(), 10).bins.is_empty());
        assert!(Histogram::new([1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0], 5);
        assert_eq!(histogram.bins.len(), 5);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[4].count, 1);
        assert_eq!(histogram.bins[4].range.end, 10.0);
    }

    #[test]
    fn test_constant_values() {
        let histogram = Histogram::new([3.0; 4], 2);
        assert_eq!(histogram.total(), 4);
        assert_eq!(histogram.bins[0].range.start, 2.5);
        assert_eq!(histogram.bins[1].range.end, 3.5);
    }

    #[test]
    fn test_preserves_all_values() {
        let values = (0..891).map(|v| f64::from(v) * 0.37).collect::<Vec<_>>();
        let histogram = Histogram::new(values, 30);
        assert_eq!(histogram.total(), 891);
        assert!(histogram.max_count() > 0);
    }
}
