use steerage_table::{
    PassengerTable,
    clean::{self, CleaningReport},
    inspect,
};

use super::{load::HEAD_ROWS, reporter::Reporter};

pub(super) fn run(
    table: &mut PassengerTable,
    reporter: &mut Reporter,
) -> anyhow::Result<CleaningReport> {
    println!();
    println!("== CLEAN ==");
    let report = clean::clean(table);
    println!("Duplicates removed: {}", report.duplicates_removed);
    if let Some(age) = &report.age {
        println!("age: {} nulls filled with median {}", age.filled, age.value);
    }
    if let Some(embarked) = &report.embarked {
        println!(
            "embarked: {} nulls filled with mode {}",
            embarked.filled, embarked.value
        );
    }
    let nulls_post = inspect::counts_frame("nulls", &report.nulls_after);
    println!("Nulls after imputation:");
    println!("{nulls_post}");

    reporter.table("tbl_head_post_clean", &table.head(HEAD_ROWS), "Head after cleaning")?;
    if !report.nulls_after.is_empty() {
        reporter.table("tbl_nulls_post", &nulls_post, "Nulls after imputation")?;
    }
    Ok(report)
}
