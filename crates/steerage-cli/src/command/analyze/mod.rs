//! Full analysis command
//!
//! Runs the phases in order on one passenger table: load, inspect, clean,
//! univariate and bivariate plots, correlation and outliers, hypothesis tests
//! and export. Every phase prints its progress; tables and plots go to the
//! figures directory as PNG.

mod bivariate;
mod clean;
mod export;
mod hypothesis;
pub(super) mod inspect;
pub(super) mod load;
mod outliers;
pub(super) mod reporter;
mod univariate;

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use steerage_render::figures::FigureWriter;
use steerage_stats::outliers::DEFAULT_IQR_FACTOR;
use steerage_table::clean::CleaningReport;
use tracing::info;

use self::{
    export::ExportSummary, hypothesis::HypothesisSummary, outliers::OutlierSummary,
    reporter::Reporter,
};
use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Passenger CSV with the Kaggle Titanic train columns
    #[arg(long, default_value = "data/train.csv")]
    pub input: PathBuf,
    /// Directory for table and plot images
    #[arg(long, default_value = "figures")]
    pub figures_dir: PathBuf,
    /// Directory for the cleaned and encoded CSV files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Rows kept in rendered tables; longer tables are truncated
    #[arg(long, default_value_t = 30)]
    pub max_table_rows: usize,
    /// Number of bins of the age histogram
    #[arg(long, default_value_t = 30)]
    pub hist_bins: usize,
    /// IQR multiplier of the outlier fences and box plot whiskers
    #[arg(long, default_value_t = DEFAULT_IQR_FACTOR)]
    pub iqr_k: f64,
    /// Write a JSON summary of the run to this path (`-` for stdout)
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

impl Default for AnalyzeArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/train.csv"),
            figures_dir: PathBuf::from("figures"),
            output_dir: PathBuf::from("."),
            max_table_rows: 30,
            hist_bins: 30,
            iqr_k: DEFAULT_IQR_FACTOR,
            summary_json: None,
        }
    }
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, Serialize)]
struct AnalysisSummary {
    input: PathBuf,
    shape_raw: (usize, usize),
    shape_clean: (usize, usize),
    cleaning: CleaningReport,
    outliers: Vec<OutlierSummary>,
    tests: HypothesisSummary,
    export: ExportSummary,
    figures: Vec<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input,
        figures_dir,
        output_dir,
        max_table_rows,
        hist_bins,
        iqr_k,
        summary_json,
    } = arg;

    let figures = FigureWriter::create(figures_dir).with_context(|| {
        format!("Failed to prepare figures directory: {}", figures_dir.display())
    })?;
    let mut reporter = Reporter::with_figures(figures, *max_table_rows);

    let mut table = load::run(input, &mut reporter)?;
    let shape_raw = table.shape();
    inspect::run(&table, &mut reporter)?;
    let cleaning = clean::run(&mut table, &mut reporter)?;
    univariate::run(&table, *hist_bins, &mut reporter)?;
    bivariate::run(&table, *iqr_k, &mut reporter)?;
    let outliers = outliers::run(&table, *iqr_k, &mut reporter)?;
    let tests = hypothesis::run(&table, &mut reporter)?;
    let export = export::run(&table, output_dir)?;
    info!(
        figures = reporter.written().len(),
        rows = table.row_count(),
        "analysis finished"
    );

    if let Some(path) = summary_json {
        let summary = AnalysisSummary {
            input: input.clone(),
            shape_raw,
            shape_clean: table.shape(),
            cleaning,
            outliers,
            tests,
            export,
            figures: reporter.written().to_vec(),
        };
        Output::save_json(&summary, path)?;
    }
    Ok(())
}
