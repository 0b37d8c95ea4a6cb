//! Input/output helpers.
//!
//! - dataset ingest + validation (`ingest`)
//! - results file and CSV export (`export`)
//! - analysis JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
