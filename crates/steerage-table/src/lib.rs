//! The passenger table and the data-handling phases of the analysis
//!
//! This crate owns everything that touches rows and columns:
//!
//! 1. **Load** ([`loader`]): read the CSV, keep the whitelisted columns of the
//!    [`schema`], rename and retype them into a [`table::PassengerTable`]
//! 2. **Inspect** ([`inspect`]): null counts, describe tables, cardinality,
//!    value counts, crosstabs and the correlation matrix, all as
//!    [`report::ReportFrame`]s
//! 3. **Clean** ([`clean`]): drop duplicates, impute `age` and `embarked`,
//!    derive `family_size`
//! 4. **Export** ([`encode`], [`export`]): one-hot encode and write CSVs
//!
//! Columns are typed and nullable ([`column::ColumnData`]). A step that needs
//! a column the table does not have is skipped rather than failing.
//!
//! # Example
//!
//! ```
//! use steerage_table::{clean, encode, inspect, loader::{self, HeaderStyle}};
//!
//! let csv = "\
//! PassengerId,Survived,Sex,Age,Embarked
//! 1,0,male,22,S
//! 2,1,female,,C
//! 3,1,female,26,
//! ";
//! let mut table = loader::from_reader(csv.as_bytes(), HeaderStyle::Source).unwrap();
//! assert_eq!(table.shape(), (3, 4));
//!
//! let nulls = inspect::null_counts(&table);
//! println!("{}", inspect::counts_frame("nulls", &nulls));
//!
//! let report = clean::clean(&mut table);
//! assert_eq!(report.nulls_after.iter().map(|(_, n)| n).sum::<usize>(), 0);
//!
//! let encoded = encode::one_hot(&table);
//! assert_eq!(encoded.names, ["survived", "age", "sex_male", "embarked_S"]);
//! ```

pub mod clean;
pub mod column;
pub mod encode;
pub mod error;
pub mod export;
pub mod inspect;
pub mod loader;
pub mod report;
pub mod schema;
pub mod table;

pub use self::{error::TableError, schema::Field, table::PassengerTable};
