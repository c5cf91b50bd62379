use steerage_table::{PassengerTable, inspect};

use super::reporter::Reporter;

const PRINTED_NULL_ROWS: usize = 10;

pub(crate) fn run(table: &PassengerTable, reporter: &mut Reporter) -> anyhow::Result<()> {
    println!();
    println!("== INSPECT ==");
    let nulls = inspect::null_counts(table);
    let printed = &nulls[..nulls.len().min(PRINTED_NULL_ROWS)];
    println!("Nulls per column:");
    println!("{}", inspect::counts_frame("nulls", printed));

    reporter.table(
        "tbl_nulls",
        &inspect::counts_frame("nulls", &nulls),
        "Null values per column",
    )?;
    reporter.rounded_table(
        "tbl_desc_num",
        &inspect::describe_numeric(table),
        "Statistics (numeric)",
    )?;

    if let Some(desc_cat) = inspect::describe_categorical(table) {
        reporter.table("tbl_desc_cat", &desc_cat, "Statistics (categorical)")?;
        let cardinality = inspect::cardinality(table);
        reporter.table(
            "tbl_cardinality",
            &inspect::counts_frame("nunique", &cardinality),
            "Cardinality of categorical columns",
        )?;
    }
    Ok(())
}
