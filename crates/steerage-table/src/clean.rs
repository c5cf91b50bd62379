//! Cleaning: duplicate removal, imputation and derived columns
//!
//! [`clean`] runs every step in order on a table in place. Each step checks
//! the columns it needs and does nothing when they are absent.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    column::{CellKey, Column, ColumnData},
    schema::Field,
    table::PassengerTable,
};

/// A fill value and the number of nulls it replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imputation<T> {
    pub value: T,
    pub filled: usize,
}

/// What [`clean`] changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    pub age: Option<Imputation<f64>>,
    pub embarked: Option<Imputation<String>>,
    pub family_size_derived: bool,
    /// Remaining nulls in `age` and `embarked`, for the columns that exist.
    pub nulls_after: Vec<(Field, usize)>,
}

/// Runs the cleaning steps on `table`.
///
/// ```
/// use steerage_table::{clean, loader::{self, HeaderStyle}, schema::Field};
///
/// let csv = "Survived,Age,SibSp,Parch,Embarked\n0,22,1,0,S\n1,,0,0,\n1,38,1,2,S\n";
/// let mut table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
/// let report = clean::clean(&mut table);
/// assert_eq!(report.age.unwrap().value, 30.0);
/// assert_eq!(report.embarked.unwrap().value, "S");
/// assert_eq!(table.ints(Field::FamilySize), Some(&[Some(2), Some(1), Some(4)][..]));
/// ```
pub fn clean(table: &mut PassengerTable) -> CleaningReport {
    let rows_before = table.row_count();
    let duplicates_removed = drop_duplicates(table);
    let age = impute_median_counted(table, Field::Age);
    let embarked = impute_mode_counted(table, Field::Embarked);
    let family_size_derived = derive_family_size(table);
    let nulls_after = [Field::Age, Field::Embarked]
        .into_iter()
        .filter_map(|field| Some((field, table.column(field)?.data.null_count())))
        .collect();

    CleaningReport {
        rows_before,
        rows_after: table.row_count(),
        duplicates_removed,
        age,
        embarked,
        family_size_derived,
        nulls_after,
    }
}

/// Removes rows identical to an earlier row, comparing every column.
///
/// Nulls are equal to each other. The first occurrence is kept along with its
/// original row label. Returns the number of rows removed.
pub fn drop_duplicates(table: &mut PassengerTable) -> usize {
    let rows = table.row_count();
    let mask = {
        let mut seen = HashSet::with_capacity(rows);
        (0..rows)
            .map(|row| {
                let key = table
                    .columns()
                    .iter()
                    .map(|c| c.data.key(row))
                    .collect::<Vec<CellKey<'_>>>();
                seen.insert(key)
            })
            .collect::<Vec<_>>()
    };
    let removed = mask.iter().filter(|keep| !**keep).count();
    if removed > 0 {
        table.retain_rows(&mask);
    }
    removed
}

/// Replaces nulls in a float column with the median of its observed values.
///
/// Returns `None` when the column is absent or not a float column, and when
/// it has no observed values (the column is left unchanged).
pub fn impute_median(table: &mut PassengerTable, field: Field) -> Option<f64> {
    impute_median_counted(table, field).map(|i| i.value)
}

fn impute_median_counted(table: &mut PassengerTable, field: Field) -> Option<Imputation<f64>> {
    let Some(column) = table.column_mut(field) else {
        debug!(%field, "column absent, skipping median imputation");
        return None;
    };
    let ColumnData::Float(values) = &mut column.data else {
        debug!(%field, "not a float column, skipping median imputation");
        return None;
    };
    let Some(median) = steerage_stats::descriptive::median(values.iter().flatten().copied())
    else {
        warn!(%field, "no observed values, leaving nulls in place");
        return None;
    };
    let filled = fill_nulls(values, median);
    debug!(%field, median, filled, "imputed median");
    Some(Imputation {
        value: median,
        filled,
    })
}

/// Replaces nulls in a categorical column with its most frequent value.
///
/// Ties go to the value encountered first. Returns `None` when the column is
/// absent, not categorical, or entirely null.
pub fn impute_mode(table: &mut PassengerTable, field: Field) -> Option<String> {
    impute_mode_counted(table, field).map(|i| i.value)
}

fn impute_mode_counted(table: &mut PassengerTable, field: Field) -> Option<Imputation<String>> {
    let Some(column) = table.column_mut(field) else {
        debug!(%field, "column absent, skipping mode imputation");
        return None;
    };
    let Some(mode) = category_mode(&column.data) else {
        warn!(%field, "no observed values, leaving nulls in place");
        return None;
    };
    let ColumnData::Category(values) = &mut column.data else {
        return None;
    };
    let filled = fill_nulls(values, mode.clone());
    debug!(%field, %mode, filled, "imputed mode");
    Some(Imputation {
        value: mode,
        filled,
    })
}

fn category_mode(data: &ColumnData) -> Option<String> {
    if !data.is_category() {
        return None;
    }
    let (top, _) = data.value_counts().into_iter().next()?;
    Some(top.to_string())
}

/// Fills `sibsp`/`parch` nulls with 0 and sets `family_size = sibsp + parch + 1`.
///
/// Needs both columns; returns whether `family_size` was written.
pub fn derive_family_size(table: &mut PassengerTable) -> bool {
    if !table.has_all(&[Field::SibSp, Field::Parch]) {
        debug!("sibsp/parch absent, not deriving family_size");
        return false;
    }
    for field in [Field::SibSp, Field::Parch] {
        if let Some(Column {
            data: ColumnData::Int(values),
            ..
        }) = table.column_mut(field)
        {
            fill_nulls(values, 0);
        }
    }
    let (Some(sibsp), Some(parch)) = (table.ints(Field::SibSp), table.ints(Field::Parch)) else {
        return false;
    };
    let family_size = sibsp
        .iter()
        .zip(parch)
        .map(|(s, p)| Some(s.unwrap_or(0) + p.unwrap_or(0) + 1))
        .collect();
    table.set_column(Column::new(Field::FamilySize, ColumnData::Int(family_size)));
    true
}

fn fill_nulls<T>(values: &mut [Option<T>], fill: T) -> usize
where
    T: Clone,
{
    let mut filled = 0;
    for value in values.iter_mut().filter(|v| v.is_none()) {
        *value = Some(fill.clone());
        filled += 1;
    }
    filled
}
