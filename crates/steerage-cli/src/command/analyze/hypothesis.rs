use serde::Serialize;
use steerage_stats::hypothesis::{ChiSquaredResult, TTestResult, chi2_contingency, welch_t_test};
use steerage_table::{Field, PassengerTable, inspect::Crosstab};
use tracing::{debug, warn};

use super::{bivariate::group_by_key, reporter::Reporter};

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct HypothesisSummary {
    /// Fare of survivors (a) against non-survivors (b).
    pub fare_by_survived: Option<TTestResult>,
    pub sex_vs_survived: Option<ChiSquaredResult>,
}

pub(super) fn run(
    table: &PassengerTable,
    reporter: &mut Reporter,
) -> anyhow::Result<HypothesisSummary> {
    println!();
    println!("== HYPOTHESIS TESTS ==");
    let mut summary = HypothesisSummary::default();

    if let (Some(fare), Some(survived)) = (table.floats(Field::Fare), table.ints(Field::Survived)) {
        let mut groups = group_by_key(survived, fare);
        let survivors = groups.remove(&1).unwrap_or_default();
        let others = groups.remove(&0).unwrap_or_default();
        match welch_t_test(survivors, others) {
            Ok(result) => {
                println!(
                    "T-test fare | survived: t={:.3}, p={:.3e}",
                    result.statistic, result.p_value
                );
                summary.fare_by_survived = Some(result);
            }
            Err(err) => {
                warn!(%err, "skipping t-test of fare by survived");
                println!("T-test fare | survived: skipped ({err})");
            }
        }
    } else {
        debug!("fare or survived missing, skipping t-test");
    }

    if let Some(crosstab) = Crosstab::new(table, Field::Sex, Field::Survived) {
        let frame = crosstab.to_frame();
        println!("Chi-squared sex ~ survived:");
        println!("{frame}");
        match chi2_contingency(&crosstab.counts) {
            Ok(result) => {
                println!(
                    "chi2={:.3}, dof={}, p={:.3e}",
                    result.statistic, result.dof, result.p_value
                );
                summary.sex_vs_survived = Some(result);
            }
            Err(err) => {
                warn!(%err, "skipping chi-squared test of sex and survived");
                println!("chi2: skipped ({err})");
            }
        }
        reporter.table(
            "tbl_contingency_sex_survived",
            &frame,
            "Contingency table sex ~ survived",
        )?;
    } else {
        debug!("sex or survived missing, skipping chi-squared test");
    }
    Ok(summary)
}
