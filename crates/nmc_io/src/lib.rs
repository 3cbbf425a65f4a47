//! # NMC IO (Adapter Layer)
//!
//! Thin tabular adapters around the engine:
//!
//! - [`table::NumericTable`] - delimited-text ingestion with random
//!   access by row index and column lookup by name;
//! - [`results`] - writes a [`nmc_core::ResultSet`] as a delimited
//!   results table (one row per time index, a time column plus one
//!   column per requested XVA kind) for external reporting.

pub mod error;
pub mod results;
pub mod table;

pub use error::IoError;
pub use results::{write_result_set, write_result_set_to_path};
pub use table::NumericTable;
