use crate::{descriptive::DescriptiveStats, percentiles::Percentiles};

/// Percentile points reported by [`Summary`].
pub const QUARTILE_POINTS: [f64; 3] = [25.0, 50.0, 75.0];

/// Column summary combining descriptive statistics and quartiles.
///
/// This is the per-column content of a "describe" table: count, mean,
/// standard deviation, min, quartiles and max.
///
/// # Examples
///
/// ```
/// use steerage_stats::summary::Summary;
///
/// let stats = Summary::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.percentiles.get(50.0), Some(5.5));
/// assert_eq!(stats.to_row()[0], 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Summary {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Quartile values.
    pub percentiles: Percentiles,
}

impl Summary {
    /// Labels of the values returned by [`Summary::to_row`], in order.
    pub const ROW_LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Computes the summary from unsorted values, skipping NaN.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted = crate::percentiles::sorted_finite(values);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from pre-sorted values.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, &QUARTILE_POINTS);
        Some(Self { stats, percentiles })
    }

    /// Values in [`Summary::ROW_LABELS`] order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_row(&self) -> [f64; 8] {
        let quartile = |p| self.percentiles.get(p).unwrap_or(f64::NAN);
        [
            self.stats.count as f64,
            self.stats.mean,
            self.stats.std_dev,
            self.stats.min,
            quartile(25.0),
            quartile(50.0),
            quartile(75.0),
            self.stats.max,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_matches_labels() {
        let summary = Summary::new([22.0, 38.0, 26.0, 35.0]).unwrap();
        let row = summary.to_row();
        assert_eq!(row.len(), Summary::ROW_LABELS.len());
        assert_eq!(row[0], 4.0);
        assert_eq!(row[1], 30.25);
        assert_eq!(row[3], 22.0);
        assert_eq!(row[4], 25.0);
        assert_eq!(row[5], 30.5);
        assert_eq!(row[6], 35.75);
        assert_eq!(row[7], 38.0);
    }

    #[test]
    fn test_empty() {
        assert!(Summary::new([f64::NAN]).is_none());
    }
}
