use std::path::Path;

use anyhow::Context;
use steerage_table::{PassengerTable, loader};

use super::reporter::Reporter;

pub(super) const HEAD_ROWS: usize = 5;

pub(crate) fn run(input: &Path, reporter: &mut Reporter) -> anyhow::Result<PassengerTable> {
    println!("== LOAD ==");
    let table = loader::read_passengers(input)
        .with_context(|| format!("Failed to load passenger table: {}", input.display()))?;
    let (rows, cols) = table.shape();
    println!("Shape: ({rows}, {cols})");
    println!("{}", table.dtypes());

    reporter.table("tbl_head_raw", &table.head(HEAD_ROWS), "Head (raw, normalized)")?;
    reporter.table("tbl_dtypes", &table.dtypes(), "Data types")?;
    reporter.table("tbl_shape", &table.shape_frame(), "Table shape")?;
    Ok(table)
}

