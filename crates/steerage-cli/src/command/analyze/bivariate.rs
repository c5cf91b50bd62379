use std::collections::BTreeMap;

use steerage_render::chart::{self, Labels};
use steerage_stats::outliers::BoxStats;
use steerage_table::{Field, PassengerTable, inspect::Crosstab};
use tracing::debug;

use super::reporter::Reporter;

pub(super) fn run(
    table: &PassengerTable,
    iqr_k: f64,
    reporter: &mut Reporter,
) -> anyhow::Result<()> {
    println!();
    println!("== BIVARIATE ==");
    if let (Some(fare), Some(survived)) = (table.floats(Field::Fare), table.ints(Field::Survived)) {
        let groups = group_by_key(survived, fare)
            .into_iter()
            .filter_map(|(key, values)| Some((key.to_string(), BoxStats::new(values, iqr_k)?)))
            .collect::<Vec<_>>();
        let image = chart::box_plot(&groups, &Labels::new("Fare by survival", "survived", "fare"));
        reporter.plot("plot_box_fare_survived", &image)?;
    } else {
        debug!("fare or survived missing, skipping fare box plot");
    }

    if let Some(crosstab) = Crosstab::new(table, Field::Sex, Field::Survived) {
        let image = chart::grouped_bars(
            &crosstab.row_labels,
            &crosstab.col_labels,
            &crosstab.counts,
            Field::Survived.name(),
            &Labels::new("Survival by sex", "sex", "count"),
        );
        reporter.plot("plot_count_sex_survived", &image)?;
    } else {
        debug!("sex or survived missing, skipping survival by sex");
    }
    Ok(())
}

/// Non-null `values` grouped by non-null `keys`, in ascending key order.
pub(super) fn group_by_key(
    keys: &[Option<i64>],
    values: &[Option<f64>],
) -> BTreeMap<i64, Vec<f64>> {
    let mut groups = BTreeMap::<i64, Vec<f64>>::new();
    for (key, value) in keys.iter().zip(values) {
        if let (Some(key), Some(value)) = (key, value) {
            groups.entry(*key).or_default().push(*value);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_key_drops_nulls() {
        let keys = [Some(1), Some(0), None, Some(1)];
        let values = [Some(71.28), Some(7.25), Some(8.05), None];
        let groups = group_by_key(&keys, &values);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&0], [7.25]);
        assert_eq!(groups[&1], [71.28]);
    }
}
