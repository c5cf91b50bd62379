//! Table inspection: missing values, summaries and cross tabulations
//!
//! Every function here is read-only and returns a [`ReportFrame`] (or data
//! that is turned into one) so the caller can print it and render it.

use steerage_stats::{correlation::CorrelationMatrix, summary::Summary};

use crate::{
    column::Cell,
    report::ReportFrame,
    schema::{ColumnKind, Field},
    table::PassengerTable,
};

/// Null count per column, most missing first.
///
/// Ties keep column order.
#[must_use]
pub fn null_counts(table: &PassengerTable) -> Vec<(Field, usize)> {
    let mut counts = table
        .columns()
        .iter()
        .map(|c| (c.field, c.data.null_count()))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Renders `(field, count)` pairs as a single-column frame.
#[must_use]
pub fn counts_frame(name: &str, counts: &[(Field, usize)]) -> ReportFrame {
    ReportFrame::from_series(name, counts.iter().map(|(f, c)| (f.name(), *c)))
}

/// Numeric (int and float) fields, in table order.
#[must_use]
pub fn numeric_fields(table: &PassengerTable) -> Vec<Field> {
    fields_of_kind(table, ColumnKind::is_numeric)
}

/// Categorical fields, in table order.
#[must_use]
pub fn categorical_fields(table: &PassengerTable) -> Vec<Field> {
    fields_of_kind(table, |kind| kind == ColumnKind::Category)
}

fn fields_of_kind(table: &PassengerTable, pred: impl Fn(ColumnKind) -> bool) -> Vec<Field> {
    table
        .columns()
        .iter()
        .filter(|c| pred(c.data.kind()))
        .map(|c| c.field)
        .collect()
}

/// Describe table of the numeric columns.
///
/// Rows are `count, mean, std, min, 25%, 50%, 75%, max`; one column per
/// numeric field. A column with no observed values has a zero count and NaN
/// elsewhere.
#[must_use]
pub fn describe_numeric(table: &PassengerTable) -> ReportFrame {
    let fields = numeric_fields(table);
    let columns = fields
        .iter()
        .map(|f| {
            let values = table.numeric(*f).unwrap_or_default();
            Summary::new(values.into_iter().flatten()).map_or_else(
                || {
                    let mut row = [f64::NAN; 8];
                    row[0] = 0.0;
                    row
                },
                |s| s.to_row(),
            )
        })
        .collect::<Vec<_>>();

    let mut frame = ReportFrame::new(fields.iter().map(|f| f.name()));
    for (i, label) in Summary::ROW_LABELS.iter().enumerate() {
        let cells = columns
            .iter()
            .map(|col| {
                let v = col[i];
                if v.is_nan() { Cell::Null } else { Cell::Float(v) }
            })
            .collect();
        frame.push_row(label, cells);
    }
    frame
}

/// Describe table of the categorical columns, one row per column.
///
/// Columns are `count, unique, top, freq`. `top` is the most frequent value
/// (first encountered on ties). Returns `None` if the table has no
/// categorical column.
#[must_use]
pub fn describe_categorical(table: &PassengerTable) -> Option<ReportFrame> {
    let fields = categorical_fields(table);
    if fields.is_empty() {
        return None;
    }
    let mut frame = ReportFrame::new(["count", "unique", "top", "freq"]);
    for field in fields {
        let Some(column) = table.column(field) else {
            continue;
        };
        let data = &column.data;
        let count = data.len() - data.null_count();
        let (top, freq) = data
            .value_counts()
            .into_iter()
            .next()
            .map_or((Cell::Null, Cell::Null), |(cell, n)| (cell, n.into()));
        frame.push_row(
            field,
            vec![count.into(), data.n_unique().into(), top, freq],
        );
    }
    Some(frame)
}

/// Distinct value count per categorical column, highest first.
#[must_use]
pub fn cardinality(table: &PassengerTable) -> Vec<(Field, usize)> {
    let mut counts = categorical_fields(table)
        .into_iter()
        .filter_map(|f| Some((f, table.column(f)?.data.n_unique())))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Value counts of one column as a `count` frame indexed by value.
#[must_use]
pub fn value_counts_frame(table: &PassengerTable, field: Field) -> Option<ReportFrame> {
    let counts = table.column(field)?.data.value_counts();
    Some(ReportFrame::from_series("count", counts))
}

/// Observed counts of two categorical-like columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Crosstab {
    /// Sorted distinct values of the row field.
    pub row_labels: Vec<String>,
    /// Sorted distinct values of the column field.
    pub col_labels: Vec<String>,
    /// `counts[i][j]` = rows with `row_labels[i]` and `col_labels[j]`.
    pub counts: Vec<Vec<u64>>,
}

impl Crosstab {
    /// Tabulates rows where both fields are non-null.
    ///
    /// Integer values sort numerically, other values lexicographically.
    #[must_use]
    pub fn new(table: &PassengerTable, row_field: Field, col_field: Field) -> Option<Self> {
        let rows = table.column(row_field)?;
        let cols = table.column(col_field)?;

        let pairs = (0..table.row_count())
            .filter_map(|i| {
                let (a, b) = (rows.data.cell(i), cols.data.cell(i));
                (!a.is_null() && !b.is_null()).then_some((a, b))
            })
            .collect::<Vec<_>>();

        let row_values = sorted_distinct(pairs.iter().map(|(a, _)| a));
        let col_values = sorted_distinct(pairs.iter().map(|(_, b)| b));
        let mut counts = vec![vec![0_u64; col_values.len()]; row_values.len()];
        for (a, b) in &pairs {
            let i = row_values.iter().position(|v| v == a)?;
            let j = col_values.iter().position(|v| v == b)?;
            counts[i][j] += 1;
        }

        Some(Self {
            row_labels: row_values.iter().map(ToString::to_string).collect(),
            col_labels: col_values.iter().map(ToString::to_string).collect(),
            counts,
        })
    }

    #[must_use]
    pub fn to_frame(&self) -> ReportFrame {
        let mut frame = ReportFrame::new(self.col_labels.iter().cloned());
        for (label, row) in self.row_labels.iter().zip(&self.counts) {
            let cells = row
                .iter()
                .map(|&c| Cell::Int(i64::try_from(c).unwrap_or(i64::MAX)))
                .collect();
            frame.push_row(label, cells);
        }
        frame
    }
}

fn sorted_distinct<'a, I>(cells: I) -> Vec<Cell>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut values: Vec<Cell> = vec![];
    for cell in cells {
        if !values.contains(cell) {
            values.push(cell.clone());
        }
    }
    values.sort_by(|a, b| match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.to_string().cmp(&b.to_string()),
    });
    values
}

/// Pearson correlation matrix over the numeric columns.
#[must_use]
pub fn correlation_matrix(table: &PassengerTable) -> CorrelationMatrix {
    let columns = numeric_fields(table)
        .into_iter()
        .filter_map(|f| Some((f.name().to_owned(), table.numeric(f)?)))
        .collect::<Vec<_>>();
    CorrelationMatrix::new(&columns)
}
