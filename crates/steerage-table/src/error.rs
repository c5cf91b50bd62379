use std::path::PathBuf;

use crate::schema::ColumnKind;

/// Failures while reading or writing passenger tables.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("input file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[display("failed to read CSV {}", path.display())]
    Read { path: PathBuf, source: csv::Error },
    #[display("failed to write CSV {}", path.display())]
    Write { path: PathBuf, source: csv::Error },
    #[display("malformed CSV record")]
    Record { source: csv::Error },
    #[display("row {row}: cannot parse '{value}' in column '{column}' as {kind}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        kind: ColumnKind,
    },
    #[display("row {row}: column '{column}' must not be empty")]
    MissingValue { row: usize, column: &'static str },
}
