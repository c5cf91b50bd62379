//! Pearson correlation over nullable numeric columns.

/// Pearson correlation coefficient over the rows where both values are present.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance.
///
/// # Examples
///
/// ```
/// use steerage_stats::correlation::pearson;
///
/// let x = [Some(1.0), Some(2.0), Some(3.0), None];
/// let y = [Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
/// assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .collect::<Vec<_>>();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Column names, in input order. Rows and columns share this order.
    pub names: Vec<String>,
    /// `values[i][j]` is the correlation between `names[i]` and `names[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Computes the matrix for named columns of equal length.
    ///
    /// The diagonal is 1.0 for every column with non-zero variance and NaN
    /// otherwise.
    #[must_use]
    pub fn new(columns: &[(String, Vec<Option<f64>>)]) -> Self {
        let names = columns.iter().map(|(name, _)| name.clone()).collect();
        let values = columns
            .iter()
            .map(|(_, a)| columns.iter().map(|(_, b)| pearson(a, b)).collect())
            .collect();
        Self { names, values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up the coefficient between two named columns.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let r = pearson(&col(&[1.0, 2.0, 3.0]), &col(&[3.0, 2.0, 1.0]));
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_nan() {
        assert!(pearson(&col(&[1.0, 1.0, 1.0]), &col(&[1.0, 2.0, 3.0])).is_nan());
        assert!(pearson(&col(&[1.0]), &col(&[1.0])).is_nan());
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let columns = vec![
            ("a".to_owned(), col(&[1.0, 2.0, 3.0, 4.0])),
            ("b".to_owned(), col(&[2.0, 1.0, 4.0, 3.0])),
            ("c".to_owned(), col(&[10.0, 7.0, 3.0, 1.0])),
        ];
        let matrix = CorrelationMatrix::new(&columns);
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert!((matrix.values[i][i] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!((matrix.values[i][j] - matrix.values[j][i]).abs() < 1e-12);
            }
        }
        assert!((matrix.get("a", "b").unwrap() - 0.6).abs() < 1e-12);
        assert!(matrix.get("a", "missing").is_none());
    }
}
