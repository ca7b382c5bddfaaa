//! Core types for elusive: errors, run configuration, taxonomy helpers, and
//! the record shapes shared between the storage layer and the CLI.

pub mod config;
pub mod error;
pub mod taxonomy;
pub mod types;

pub use config::RunConfig;
pub use error::{ElusiveError, ElusiveResult};
pub use taxonomy::Rank;
pub use types::{CompareRecord, ElusiveRecord, SummaryRecord};
