//! Two-sample and independence hypothesis tests.
//!
//! - [`welch_t_test`]: difference in means without assuming equal variances
//! - [`chi2_contingency`]: independence of two categorical variables
//!
//! Both return two-sided / upper-tail p-values computed from `statrs`
//! distributions.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

use crate::descriptive::DescriptiveStats;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TestError {
    #[display("sample '{sample}' needs at least two observations, got {count}")]
    TooFewObservations { sample: &'static str, count: usize },
    #[display("both samples have zero variance")]
    ZeroVariance,
    #[display("contingency table needs at least 2x2 cells, got {rows}x{cols}")]
    DegenerateTable { rows: usize, cols: usize },
    #[display("contingency table rows have different lengths")]
    RaggedTable,
    #[display("expected frequency is zero at row {row}, column {col}")]
    ZeroExpected { row: usize, col: usize },
    #[display("invalid {distribution} distribution with {dof} degrees of freedom")]
    Distribution {
        distribution: &'static str,
        dof: f64,
    },
}

/// Outcome of Welch's unequal-variance t-test.
#[derive(Debug, Clone, Serialize)]
pub struct TTestResult {
    /// t statistic of `mean(a) - mean(b)`.
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub dof: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub count_a: usize,
    pub count_b: usize,
}

/// Welch's two-sample t-test on samples `a` and `b`. NaN values are skipped.
///
/// # Examples
///
/// ```
/// use steerage_stats::hypothesis::welch_t_test;
///
/// let survivors = [71.28, 53.1, 13.0, 30.07, 16.7];
/// let others = [7.25, 8.05, 8.46, 21.07, 7.9];
/// let result = welch_t_test(survivors, others).unwrap();
/// assert!(result.statistic > 0.0);
/// assert!(result.p_value > 0.0 && result.p_value < 1.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn welch_t_test<A, B>(a: A, b: B) -> Result<TTestResult, TestError>
where
    A: IntoIterator<Item = f64>,
    B: IntoIterator<Item = f64>,
{
    let stats_a = sample_stats(a, "a")?;
    let stats_b = sample_stats(b, "b")?;

    let se_a = stats_a.variance / stats_a.count as f64;
    let se_b = stats_b.variance / stats_b.count as f64;
    let se2 = se_a + se_b;
    if se2 <= 0.0 {
        return Err(TestError::ZeroVariance);
    }

    let statistic = (stats_a.mean - stats_b.mean) / se2.sqrt();
    let dof = se2.powi(2)
        / (se_a.powi(2) / (stats_a.count - 1) as f64 + se_b.powi(2) / (stats_b.count - 1) as f64);
    let dist = StudentsT::new(0.0, 1.0, dof).map_err(|_| TestError::Distribution {
        distribution: "Student's t",
        dof,
    })?;
    let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);

    Ok(TTestResult {
        statistic,
        dof,
        p_value,
        mean_a: stats_a.mean,
        mean_b: stats_b.mean,
        count_a: stats_a.count,
        count_b: stats_b.count,
    })
}

fn sample_stats<I>(values: I, sample: &'static str) -> Result<DescriptiveStats, TestError>
where
    I: IntoIterator<Item = f64>,
{
    match DescriptiveStats::new(values) {
        Some(stats) if stats.count >= 2 => Ok(stats),
        other => Err(TestError::TooFewObservations {
            sample,
            count: other.map_or(0, |s| s.count),
        }),
    }
}

/// Outcome of a chi-squared test of independence.
#[derive(Debug, Clone, Serialize)]
pub struct ChiSquaredResult {
    pub statistic: f64,
    pub dof: usize,
    /// Upper-tail p-value.
    pub p_value: f64,
    /// Expected frequencies under independence, same shape as the input.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied (only for `dof == 1`).
    pub yates_correction: bool,
}

/// Chi-squared test of independence on an `r x c` table of observed counts.
///
/// Yates' continuity correction is applied when the table has one degree of
/// freedom: each `|observed - expected|` is reduced by 0.5, but never past
/// zero.
///
/// # Examples
///
/// ```
/// use steerage_stats::hypothesis::chi2_contingency;
///
/// let table = vec![vec![10, 20], vec![20, 10]];
/// let result = chi2_contingency(&table).unwrap();
/// assert_eq!(result.dof, 1);
/// assert!(result.yates_correction);
/// assert!((result.statistic - 5.4).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn chi2_contingency(observed: &[Vec<u64>]) -> Result<ChiSquaredResult, TestError> {
    let rows = observed.len();
    let cols = observed.first().map_or(0, Vec::len);
    if observed.iter().any(|row| row.len() != cols) {
        return Err(TestError::RaggedTable);
    }
    if rows < 2 || cols < 2 {
        return Err(TestError::DegenerateTable { rows, cols });
    }

    let row_totals = observed
        .iter()
        .map(|row| row.iter().sum::<u64>() as f64)
        .collect::<Vec<_>>();
    let col_totals = (0..cols)
        .map(|j| observed.iter().map(|row| row[j]).sum::<u64>() as f64)
        .collect::<Vec<_>>();
    let total = row_totals.iter().sum::<f64>();

    let dof = (rows - 1) * (cols - 1);
    let yates_correction = dof == 1;

    let mut expected = vec![vec![0.0; cols]; rows];
    let mut statistic = 0.0;
    for (i, row) in observed.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            let e = row_totals[i] * col_totals[j] / total;
            if e <= 0.0 || e.is_nan() {
                return Err(TestError::ZeroExpected { row: i, col: j });
            }
            expected[i][j] = e;

            let mut diff = (count as f64 - e).abs();
            if yates_correction {
                diff = (diff - 0.5).max(0.0);
            }
            statistic += diff * diff / e;
        }
    }

    let dist = ChiSquared::new(dof as f64).map_err(|_| TestError::Distribution {
        distribution: "chi-squared",
        dof: dof as f64,
    })?;
    let p_value = dist.sf(statistic);

    Ok(ChiSquaredResult {
        statistic,
        dof,
        p_value,
        expected,
        yates_correction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welch_known_values() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let result = welch_t_test(a, b).unwrap();
        assert!((result.statistic - (-3.0 / 2.5_f64.sqrt())).abs() < 1e-12);
        assert!((result.dof - 6.25 / 1.0625).abs() < 1e-9);
        assert!(
            result.p_value > 0.05 && result.p_value < 0.2,
            "unexpected p-value {}",
            result.p_value
        );
    }

    #[test]
    fn test_welch_is_antisymmetric() {
        let a = [3.1, 4.5, 2.2, 8.9, 5.0];
        let b = [1.0, 0.5, 2.5, 1.5];
        let ab = welch_t_test(a, b).unwrap();
        let ba = welch_t_test(b, a).unwrap();
        assert!((ab.statistic + ba.statistic).abs() < 1e-12);
        assert!((ab.p_value - ba.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_welch_rejects_tiny_samples() {
        let err = welch_t_test([1.0], [1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            TestError::TooFewObservations {
                sample: "a",
                count: 1
            }
        ));
    }

    #[test]
    fn test_welch_zero_variance() {
        assert!(matches!(
            welch_t_test([2.0, 2.0], [3.0, 3.0]),
            Err(TestError::ZeroVariance)
        ));
    }

    #[test]
    fn test_chi2_two_by_two_uses_yates() {
        let result = chi2_contingency(&[vec![10, 20], vec![20, 10]]).unwrap();
        assert!((result.statistic - 5.4).abs() < 1e-9);
        assert!(
            (result.p_value - 0.020_14).abs() < 5e-4,
            "unexpected p-value {}",
            result.p_value
        );
        assert_eq!(result.expected, vec![vec![15.0, 15.0], vec![15.0, 15.0]]);
    }

    #[test]
    fn test_chi2_larger_table_without_correction() {
        let result = chi2_contingency(&[vec![10, 20], vec![20, 10], vec![15, 15]]).unwrap();
        assert_eq!(result.dof, 2);
        assert!(!result.yates_correction);
        assert!((result.statistic - 100.0 / 15.0).abs() < 1e-9);
        // Two degrees of freedom: survival function is exp(-x / 2)
        assert!((result.p_value - (-result.statistic / 2.0).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_chi2_degenerate_tables() {
        assert!(matches!(
            chi2_contingency(&[vec![1, 2]]),
            Err(TestError::DegenerateTable { rows: 1, cols: 2 })
        ));
        assert!(matches!(
            chi2_contingency(&[vec![1, 2], vec![3]]),
            Err(TestError::RaggedTable)
        ));
        assert!(matches!(
            chi2_contingency(&[vec![0, 2], vec![0, 3]]),
            Err(TestError::ZeroExpected { row: 0, col: 0 })
        ));
    }
}
