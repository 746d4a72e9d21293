//! # badgegen: CSV record pipelines for park and county badges
//!
//! Three one-shot pipelines read a CSV file, filter or transform its rows and
//! write the result:
//!
//! - **State park filter**: keeps rows whose `active` is `"1"` and whose `name`
//!   contains `"State Park"`, writing them back out as CSV.
//! - **County badges**: one multi-row `INSERT INTO badges` statement with a
//!   badge per county.
//! - **State park badges**: one single-row `INSERT INTO badges` statement per
//!   active state park.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use badgegen::{filter_state_parks, Predicate};
//!
//! let summary = filter_state_parks(
//!     Path::new("scripts/all_parks.csv"),
//!     Path::new("scripts/active_state_parks.csv"),
//!     &Predicate::active_state_park(),
//! )?;
//! println!("{}", summary);
//! # Ok::<(), badgegen::PipelineError>(())
//! ```

// Core modules
pub mod error;
pub mod record;
pub mod csv_io;
pub mod filter;
pub mod transforms;
pub mod sql;
pub mod badges;

// Configuration and pipeline drivers
pub mod config;
pub mod pipeline;

// Re-export key types
pub use error::{PipelineError, Result};
pub use record::Record;
pub use csv_io::{RecordReader, RecordWriter};
pub use filter::Predicate;
pub use sql::{Badge, MultiRowInsertWriter, SingleRowInsertWriter};
pub use badges::{DuplicatePolicy, StateParkBadgeOptions};
pub use config::Config;
pub use pipeline::{
    filter_state_parks, generate_county_badges, generate_state_park_badges, run_all,
    PipelineKind, PipelineSummary,
};
