//! Query engine for a pre-processed action-research survey.
//!
//! [`data`] holds the whole core: load the CSV once, turn selector labels
//! into [`data::criteria::FilterCriteria`], and narrow the table with
//! [`data::filter::filter`]. The desktop viewer and the `query` subcommand in
//! the binary are thin layers over it.

pub mod config;
pub mod data;
pub mod error;

pub use data::criteria::{CriteriaInput, FilterCriteria};
pub use data::filter::{count_of, filter, FilteredResult};
pub use data::loader::DataSource;
pub use data::model::{CellValue, ResponseRow, ResponseTable};
pub use error::FilterError;
