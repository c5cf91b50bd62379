use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;
use steerage_table::{
    PassengerTable, encode,
    export::{self, CLEAN_FILE_NAME, ENCODED_FILE_NAME},
};

/// Paths of the written CSV files.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExportSummary {
    pub clean: PathBuf,
    pub encoded: PathBuf,
    pub encoded_columns: Vec<String>,
}

pub(super) fn run(table: &PassengerTable, output_dir: &Path) -> anyhow::Result<ExportSummary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let clean = output_dir.join(CLEAN_FILE_NAME);
    export::write_table(table, &clean)
        .with_context(|| format!("Failed to export cleaned table: {}", clean.display()))?;

    let encoded_table = encode::one_hot(table);
    let encoded = output_dir.join(ENCODED_FILE_NAME);
    export::write_encoded(&encoded_table, &encoded)
        .with_context(|| format!("Failed to export encoded table: {}", encoded.display()))?;

    println!();
    println!("[CSV] {}, {}", clean.display(), encoded.display());
    Ok(ExportSummary {
        clean,
        encoded,
        encoded_columns: encoded_table.names,
    })
}
