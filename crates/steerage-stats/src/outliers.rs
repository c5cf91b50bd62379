//! Interquartile-range outlier detection.
//!
//! Values outside `[Q1 - k·IQR, Q3 + k·IQR]` are flagged. Detection only
//! reports membership; it never removes values.

use serde::Serialize;

use crate::percentiles::{self, compute_percentile};

/// Whisker factor used when none is given.
pub const DEFAULT_IQR_FACTOR: f64 = 1.5;

/// Quartiles and derived fences of a numeric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub low: f64,
    pub high: f64,
}

impl IqrBounds {
    /// Computes the fences from unsorted values, skipping NaN.
    ///
    /// Returns `None` when no value is observed.
    ///
    /// # Examples
    ///
    /// ```
    /// use steerage_stats::outliers::IqrBounds;
    ///
    /// let bounds = IqrBounds::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 1.5).unwrap();
    /// assert_eq!(bounds.q1, 2.25);
    /// assert_eq!(bounds.q3, 4.75);
    /// assert_eq!((bounds.low, bounds.high), (-1.5, 8.5));
    /// ```
    #[must_use]
    pub fn new<I>(values: I, k: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted = percentiles::sorted_finite(values);
        Self::from_sorted(&sorted, k)
    }

    /// Computes the fences from pre-sorted values.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], k: f64) -> Option<Self> {
        if sorted_values.is_empty() {
            return None;
        }
        let q1 = compute_percentile(sorted_values, 25.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            low: q1 - k * iqr,
            high: q3 + k * iqr,
        })
    }

    /// Whether `value` falls strictly outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}

/// Flags the outliers of a nullable series.
///
/// Returns the membership mask (one entry per input, `false` for missing
/// values) and the fences, or `None` when the series has no observed values.
///
/// ```
/// use steerage_stats::outliers::outlier_mask_iqr;
///
/// let series = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(5.0), Some(100.0)];
/// let (mask, bounds) = outlier_mask_iqr(&series, 1.5).unwrap();
/// assert_eq!(mask.iter().filter(|m| **m).count(), 1);
/// assert!(mask[6]);
/// assert_eq!(bounds.high, 8.5);
/// ```
#[must_use]
pub fn outlier_mask_iqr(series: &[Option<f64>], k: f64) -> Option<(Vec<bool>, IqrBounds)> {
    let bounds = IqrBounds::new(series.iter().flatten().copied(), k)?;
    let mask = series
        .iter()
        .map(|value| value.is_some_and(|v| bounds.is_outlier(v)))
        .collect();
    Some((mask, bounds))
}

/// Five-number summary used to draw a box plot.
///
/// Whiskers reach the most extreme observations still inside the IQR fences;
/// everything beyond them is listed in `fliers`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

impl BoxStats {
    #[must_use]
    pub fn new<I>(values: I, k: f64) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let sorted = percentiles::sorted_finite(values);
        let bounds = IqrBounds::from_sorted(&sorted, k)?;
        let inside = sorted
            .iter()
            .copied()
            .filter(|v| !bounds.is_outlier(*v))
            .collect::<Vec<_>>();
        // Quartiles always lie inside the fences, so `inside` is non-empty
        let whisker_low = inside.first().copied().unwrap_or(bounds.q1);
        let whisker_high = inside.last().copied().unwrap_or(bounds.q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| bounds.is_outlier(*v))
            .collect();
        Some(Self {
            q1: bounds.q1,
            median: compute_percentile(&sorted, 50.0),
            q3: bounds.q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }

    /// Smallest and largest value drawn (whiskers and fliers).
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let low = self.fliers.iter().copied().fold(self.whisker_low, f64::min);
        let high = self.fliers.iter().copied().fold(self.whisker_high, f64::max);
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_series_has_single_outlier() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].map(Some);
        let (mask, bounds) = outlier_mask_iqr(&series, DEFAULT_IQR_FACTOR).unwrap();
        assert_eq!(mask, [false, false, false, false, false, true]);
        assert!((bounds.q1 - 2.25).abs() < 1e-12);
        assert!((bounds.q3 - 4.75).abs() < 1e-12);
        assert!((bounds.iqr - 2.5).abs() < 1e-12);
        assert!((bounds.low - (-1.5)).abs() < 1e-12);
        assert!((bounds.high - 8.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_missing() {
        assert!(outlier_mask_iqr(&[None, None], 1.5).is_none());
    }

    #[test]
    fn test_missing_values_are_not_outliers() {
        let (mask, _) = outlier_mask_iqr(&[Some(1.0), None, Some(1.0)], 1.5).unwrap();
        assert_eq!(mask, [false, false, false]);
    }

    #[test]
    fn test_custom_factor_widens_fences() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 12.0];
        let narrow = IqrBounds::new(values, 1.5).unwrap();
        let wide = IqrBounds::new(values, 3.0).unwrap();
        assert!(narrow.is_outlier(12.0));
        assert!(!wide.is_outlier(12.0));
    }

    #[test]
    fn test_box_stats_whiskers_and_fliers() {
        let stats = BoxStats::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0], 1.5).unwrap();
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.fliers, [100.0]);
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.extent(), (1.0, 100.0));
    }
}
