use serde::Serialize;
use steerage_render::chart::{self, Labels};
use steerage_stats::outliers::{BoxStats, IqrBounds, outlier_mask_iqr};
use steerage_table::{Field, PassengerTable, inspect};
use tracing::{debug, warn};

use super::reporter::Reporter;

/// Outlier count of one column.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OutlierSummary {
    pub column: Field,
    pub count: usize,
    pub bounds: IqrBounds,
}

pub(super) fn run(
    table: &PassengerTable,
    iqr_k: f64,
    reporter: &mut Reporter,
) -> anyhow::Result<Vec<OutlierSummary>> {
    println!();
    println!("== CORRELATION AND OUTLIERS ==");
    let matrix = inspect::correlation_matrix(table);
    reporter.plot("plot_corr_heatmap", &chart::heatmap(&matrix, "Correlation matrix"))?;

    let mut summaries = vec![];
    for field in [Field::Age, Field::Fare] {
        let Some(values) = table.numeric(field) else {
            debug!(column = %field, "column missing, skipping outlier detection");
            continue;
        };
        match outlier_mask_iqr(&values, iqr_k) {
            Some((mask, bounds)) => {
                let count = mask.iter().filter(|m| **m).count();
                println!(
                    "Outliers in {field}: {count} (bounds: {:.2}, {:.2})",
                    bounds.low, bounds.high
                );
                summaries.push(OutlierSummary {
                    column: field,
                    count,
                    bounds,
                });
            }
            None => warn!(column = %field, "no observed values, outlier bounds undefined"),
        }

        let stats = BoxStats::new(values.iter().flatten().copied(), iqr_k);
        let image = chart::box_plot_horizontal(
            stats.as_ref(),
            &Labels::new(format!("Boxplot {field} (IQR)"), field.name(), ""),
        );
        reporter.plot(&format!("plot_box_{field}"), &image)?;
    }
    Ok(summaries)
}
