use std::path::PathBuf;

use anyhow::Context;
use image::RgbImage;
use steerage_render::{figures::FigureWriter, table_image::TableStyle};
use steerage_table::report::ReportFrame;
use tracing::debug;

/// Where phase tables and plots go.
///
/// With a figures directory every table and plot is saved as PNG and its path
/// printed; without one tables are printed to the console and plots dropped.
#[derive(Debug)]
pub(crate) struct Reporter {
    figures: Option<FigureWriter>,
    style: TableStyle,
    written: Vec<PathBuf>,
}

impl Reporter {
    pub(crate) fn with_figures(figures: FigureWriter, max_rows: usize) -> Self {
        Self {
            figures: Some(figures),
            style: TableStyle::default().with_max_rows(Some(max_rows)),
            written: vec![],
        }
    }

    pub(crate) fn console(max_rows: usize) -> Self {
        Self {
            figures: None,
            style: TableStyle::default().with_max_rows(Some(max_rows)),
            written: vec![],
        }
    }

    /// Reports a table with full precision.
    pub(crate) fn table(
        &mut self,
        name: &str,
        frame: &ReportFrame,
        title: &str,
    ) -> anyhow::Result<()> {
        self.save_table(name, frame, title, self.style.unrounded())
    }

    /// Reports a table with floats rounded to two decimals.
    pub(crate) fn rounded_table(
        &mut self,
        name: &str,
        frame: &ReportFrame,
        title: &str,
    ) -> anyhow::Result<()> {
        self.save_table(name, frame, title, self.style)
    }

    fn save_table(
        &mut self,
        name: &str,
        frame: &ReportFrame,
        title: &str,
        style: TableStyle,
    ) -> anyhow::Result<()> {
        let Some(figures) = &self.figures else {
            let (frame, truncated_to) = style.prepare(frame);
            println!("{}", steerage_render::table_image::title_with_note(title, truncated_to));
            println!("{frame}");
            return Ok(());
        };
        let path = figures
            .save_table(name, frame, Some(title), &style)
            .with_context(|| format!("Failed to render table {name}"))?;
        println!("[TABLE] {}", path.display());
        self.written.push(path);
        Ok(())
    }

    pub(crate) fn plot(&mut self, name: &str, image: &RgbImage) -> anyhow::Result<()> {
        let Some(figures) = &self.figures else {
            debug!(name, "no figures directory, plot not saved");
            return Ok(());
        };
        let path = figures
            .save(name, image)
            .with_context(|| format!("Failed to save plot {name}"))?;
        println!("[IMG] {}", path.display());
        self.written.push(path);
        Ok(())
    }

    /// Paths of every image written so far.
    pub(crate) fn written(&self) -> &[PathBuf] {
        &self.written
    }
}
