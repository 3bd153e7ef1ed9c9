//! Descriptive statistics, correlation reports and chart inputs for the
//! iris flower measurement table.
//!
//! The viewer binary (`iris-explorer`) and the two report binaries
//! (`correlations`, `statistics`) share everything in this crate.

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod stats;

pub use data::model::{Feature, IrisDataset, Record, Species};
pub use error::StatsError;
