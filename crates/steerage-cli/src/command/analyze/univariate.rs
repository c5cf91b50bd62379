use std::collections::BTreeMap;

use steerage_render::chart::{self, Labels};
use steerage_stats::histogram::Histogram;
use steerage_table::{Field, PassengerTable, inspect};
use tracing::debug;

use super::reporter::Reporter;

pub(super) fn run(
    table: &PassengerTable,
    hist_bins: usize,
    reporter: &mut Reporter,
) -> anyhow::Result<()> {
    println!();
    println!("== UNIVARIATE ==");
    if let Some(age) = table.floats(Field::Age) {
        let histogram = Histogram::new(age.iter().flatten().copied(), hist_bins);
        let image = chart::histogram(
            &histogram,
            &Labels::new("Distribution of age", "age", "count"),
        );
        reporter.plot("plot_hist_age", &image)?;
    } else {
        debug!("no age column, skipping age histogram");
    }

    if let Some(survived) = table.ints(Field::Survived) {
        let image = chart::count_bars(
            &sorted_counts(survived),
            &Labels::new("Count: survived (0/1)", "survived", "count"),
        );
        reporter.plot("plot_count_survived", &image)?;
        if let Some(counts) = inspect::value_counts_frame(table, Field::Survived) {
            reporter.table("tbl_survived_counts", &counts, "Survived counts (0/1)")?;
        }
    } else {
        debug!("no survived column, skipping survival counts");
    }
    Ok(())
}

/// Counts of the distinct non-null values, in ascending value order.
fn sorted_counts(values: &[Option<i64>]) -> Vec<(String, u64)> {
    let mut counts = BTreeMap::<i64, u64>::new();
    for value in values.iter().flatten() {
        *counts.entry(*value).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_counts() {
        let values = [Some(1), Some(0), None, Some(1), Some(0), Some(0)];
        assert_eq!(
            sorted_counts(&values),
            [("0".to_owned(), 3), ("1".to_owned(), 2)]
        );
        assert!(sorted_counts(&[None]).is_empty());
    }
}
