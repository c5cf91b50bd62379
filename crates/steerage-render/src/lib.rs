//! Figures for the analysis: statistical plots and table images
//!
//! Everything is drawn in memory onto an [`image::RgbImage`] and written out
//! as PNG by [`figures::FigureWriter`].
//!
//! - [`chart`]: histogram, count bars, grouped bars, box plots, correlation
//!   heatmap
//! - [`table_image`]: a [`ReportFrame`](steerage_table::report::ReportFrame)
//!   drawn as a grid sized by its cell count
//! - [`canvas`] and [`font`]: the pixel primitives both build on
//!
//! # Example
//!
//! ```no_run
//! use steerage_render::{chart, figures::FigureWriter};
//! use steerage_stats::histogram::Histogram;
//!
//! let ages = [22.0, 38.0, 26.0, 35.0, 54.0, 2.0];
//! let image = chart::histogram(
//!     &Histogram::new(ages, 30),
//!     &chart::Labels::new("Distribution of age", "age", "count"),
//! );
//! let figures = FigureWriter::create("figures")?;
//! figures.save("plot_hist_age", &image)?;
//! # Ok::<(), steerage_render::RenderError>(())
//! ```

pub mod canvas;
pub mod chart;
pub mod error;
pub mod figures;
pub mod font;
pub mod table_image;

pub use self::error::RenderError;
