//! Typed nullable columns and the cells they yield

use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::schema::{ColumnKind, Field};

/// A single nullable value, as read from a column or shown in a report.
#[derive(Debug, Clone, PartialEq, derive_more::From, derive_more::IsVariant, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[from(ignore)]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Self::Null, Self::Int)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NaN"),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => f.write_str(&format_float(*v)),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

impl Cell {
    /// Numeric view of the cell.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Null | Cell::Text(_) => None,
        }
    }

    /// Rounds floating-point cells to `ndigits` decimals; other cells are unchanged.
    #[must_use]
    pub fn rounded(&self, ndigits: u32) -> Self {
        match self {
            Cell::Float(v) => {
                let scale = 10_f64.powi(i32::try_from(ndigits).unwrap_or(i32::MAX));
                Cell::Float((v * scale).round() / scale)
            }
            other => other.clone(),
        }
    }

    /// Field text for CSV output: nulls are empty.
    #[must_use]
    pub fn to_csv_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Formats a float so that integral values keep one decimal (`22.0`).
///
/// ```
/// # use steerage_table::column::format_float;
/// assert_eq!(format_float(22.0), "22.0");
/// assert_eq!(format_float(7.25), "7.25");
/// assert_eq!(format_float(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Hashable view of a cell, used to detect duplicate rows.
///
/// Nulls compare equal to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Text(&'a str),
}

/// Typed storage of a nullable column.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Category(Vec<Option<String>>),
}

impl ColumnData {
    /// An empty column of `kind`.
    #[must_use]
    pub fn empty(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Int => Self::Int(vec![]),
            ColumnKind::Float => Self::Float(vec![]),
            ColumnKind::Category => Self::Category(vec![]),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Int(_) => ColumnKind::Int,
            Self::Float(_) => ColumnKind::Float,
            Self::Category(_) => ColumnKind::Category,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Category(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Self::Int(v) => v[row].is_none(),
            Self::Float(v) => v[row].is_none(),
            Self::Category(v) => v[row].is_none(),
        }
    }

    #[must_use]
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_null(row)).count()
    }

    #[must_use]
    pub fn cell(&self, row: usize) -> Cell {
        match self {
            Self::Int(v) => v[row].into(),
            Self::Float(v) => v[row].into(),
            Self::Category(v) => v[row].clone().into(),
        }
    }

    #[must_use]
    pub fn key(&self, row: usize) -> CellKey<'_> {
        match self {
            Self::Int(v) => v[row].map_or(CellKey::Null, CellKey::Int),
            // `+ 0.0` folds -0.0 into 0.0 so both hash alike
            Self::Float(v) => v[row].map_or(CellKey::Null, |x| CellKey::Float((x + 0.0).to_bits())),
            Self::Category(v) => v[row].as_deref().map_or(CellKey::Null, CellKey::Text),
        }
    }

    /// Numeric view of the column; `None` for categorical data.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Self::Int(v) => Some(v.iter().map(|x| x.map(|x| x as f64)).collect()),
            Self::Float(v) => Some(v.clone()),
            Self::Category(_) => None,
        }
    }

    /// Keeps the rows whose mask entry is `true`.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the column length.
    pub fn retain_rows(&mut self, mask: &[bool]) {
        fn retain<T>(values: &mut Vec<T>, mask: &[bool]) {
            let mut keep = mask.iter();
            values.retain(|_| keep.next().copied().unwrap_or(false));
        }

        assert_eq!(mask.len(), self.len(), "mask length must match column");
        match self {
            Self::Int(v) => retain(v, mask),
            Self::Float(v) => retain(v, mask),
            Self::Category(v) => retain(v, mask),
        }
    }

    /// Distinct non-null categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let Self::Category(values) = self else {
            return vec![];
        };
        let mut categories = values.iter().flatten().cloned().collect::<Vec<_>>();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Number of distinct non-null values.
    #[must_use]
    pub fn n_unique(&self) -> usize {
        (0..self.len())
            .map(|row| self.key(row))
            .filter(|k| *k != CellKey::Null)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct non-null values with their counts, most frequent first.
    ///
    /// Ties keep first-encountered order.
    #[must_use]
    pub fn value_counts(&self) -> Vec<(Cell, usize)> {
        let mut counts: Vec<(CellKey<'_>, usize, usize)> = vec![];
        for row in 0..self.len() {
            let key = self.key(row);
            if key == CellKey::Null {
                continue;
            }
            match counts.iter_mut().find(|(k, _, _)| *k == key) {
                Some((_, count, _)) => *count += 1,
                None => counts.push((key, 1, row)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .map(|(_, count, first_row)| (self.cell(first_row), count))
            .collect()
    }
}

/// A named column of the passenger table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub field: Field,
    pub data: ColumnData,
}

impl Column {
    #[must_use]
    pub fn new(field: Field, data: ColumnData) -> Self {
        Self { field, data }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.field.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Null.to_string(), "NaN");
        assert_eq!(Cell::Float(3.0).to_string(), "3.0");
        assert_eq!(Cell::from(Some(4_i64)).to_string(), "4");
        assert_eq!(Cell::from(None::<f64>).to_csv_field(), "");
    }

    #[test]
    fn test_rounding_only_touches_floats() {
        assert_eq!(Cell::Float(29.699_117).rounded(2), Cell::Float(29.7));
        assert_eq!(Cell::Int(7).rounded(2), Cell::Int(7));
    }

    #[test]
    fn test_retain_rows() {
        let mut data = ColumnData::Float(vec![Some(1.0), None, Some(3.0)]);
        data.retain_rows(&[true, false, true]);
        assert_eq!(data, ColumnData::Float(vec![Some(1.0), Some(3.0)]));
    }

    #[test]
    fn test_value_counts_most_frequent_first() {
        let data = ColumnData::Category(
            ["S", "C", "S", "Q", "C", "S"]
                .iter()
                .map(|s| Some((*s).to_owned()))
                .chain([None])
                .collect(),
        );
        let counts = data.value_counts();
        assert_eq!(
            counts,
            vec![
                (Cell::from("S"), 3),
                (Cell::from("C"), 2),
                (Cell::from("Q"), 1)
            ]
        );
        assert_eq!(data.n_unique(), 3);
        assert_eq!(data.null_count(), 1);
        assert_eq!(data.categories(), ["C", "Q", "S"]);
    }

    #[test]
    fn test_nulls_share_a_key() {
        let data = ColumnData::Float(vec![None, None, Some(-0.0), Some(0.0)]);
        assert_eq!(data.key(0), data.key(1));
        assert_eq!(data.key(2), data.key(3));
    }
}
