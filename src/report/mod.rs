//! The two flat-file reports.
//!
//! Each report loads the bundled table, computes its summary, writes one CSV
//! file under [`ReportConfig::output_dir`](crate::config::ReportConfig) and
//! returns what it wrote so the binaries can print it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

pub mod correlations;
pub mod statistics;

/// Undefined values (NaN) are written as empty cells.
pub(crate) fn finite_or_empty<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A numeric CSV cell, see [`finite_or_empty`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell(pub f64);

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        finite_or_empty(&self.0, serializer)
    }
}

/// Create the directory that will hold `path`.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(())
}
