//! Output module for accumulating records and exporting them
//!
//! This module handles:
//! - Collecting heterogeneous records into one table with a unioned header
//! - Writing tables as comma-separated files
//! - Per-run reports pairing records with the failures met along the way

mod csv_export;
mod report;
mod stats;
mod table;
mod traits;

pub use csv_export::{save_csv, write_csv};
pub use report::{RunSummary, ScrapeReport};
pub use stats::print_summary;
pub use table::{Record, ResultTable};
pub use traits::IntoRecord;
