//! Statistical utilities for the Steerage passenger analysis.
//!
//! This crate provides the numeric building blocks of the analysis pipeline:
//!
//! - **Descriptive statistics**: count, mean, median, sample variance and standard deviation
//! - **Percentiles**: linear-interpolation percentiles and their storage
//! - **Summaries**: "describe"-style rows combining descriptive statistics and quartiles
//! - **Histograms**: equal-width frequency distributions
//! - **Outliers**: interquartile-range fences, outlier masks and box plot statistics
//! - **Correlation**: Pearson coefficients and correlation matrices
//! - **Hypothesis tests**: Welch's t-test and the chi-squared test of independence
//!
//! Missing observations are represented as NaN (for plain iterators) or
//! `None` (for nullable series) and are always skipped.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`summary`]: Per-column summaries for describe tables
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`outliers`]: IQR-based outlier detection
//! - [`correlation`]: Pairwise Pearson correlation
//! - [`hypothesis`]: Statistical hypothesis tests
//!
//! # Examples
//!
//! ## Flagging outliers
//!
//! ```
//! use steerage_stats::outliers::IqrBounds;
//!
//! let fares = [7.25, 71.28, 7.92, 53.1, 8.05, 512.33];
//! let bounds = IqrBounds::new(fares, 1.5).unwrap();
//! assert!(bounds.is_outlier(512.33));
//! ```
//!
//! ## Comparing two groups
//!
//! ```
//! use steerage_stats::hypothesis::welch_t_test;
//!
//! let result = welch_t_test([1.0, 2.0, 3.0, 4.0], [2.0, 3.0, 4.0, 5.5]).unwrap();
//! println!("t={:.3}, p={:.3e}", result.statistic, result.p_value);
//! ```

pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod hypothesis;
pub mod outliers;
pub mod percentiles;
pub mod summary;
