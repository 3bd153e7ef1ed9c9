use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::data::loader;
use crate::stats::correlation::{CorrelationMatrix, DiagonalPolicy, ExtremePairs};

use super::{Cell, ensure_parent};

/// What the correlation report computed and where it went.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    pub path: PathBuf,
    pub matrix: CorrelationMatrix,
    /// Extremes over distinct feature pairs.
    pub extremes: Option<ExtremePairs>,
    /// Extremes with self-pairs included, kept for comparison.
    pub extremes_with_diagonal: Option<ExtremePairs>,
}

/// Write the matrix as four rows of four values, no header, no index.
pub fn write_matrix(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in matrix.rows() {
        writer
            .serialize((*row).map(Cell))
            .context("writing correlation row")?;
    }
    writer.flush().context("flushing correlation matrix")?;
    Ok(())
}

/// Compute the correlation matrix of the bundled table and write it to
/// `<output_dir>/correlations.csv`.
pub fn run(config: &ReportConfig) -> Result<CorrelationReport> {
    let dataset = loader::load_bundled()?;
    let matrix = CorrelationMatrix::compute(&dataset).context("computing correlation matrix")?;

    let path = config.correlations_path();
    write_matrix(&matrix, &path)?;
    log::info!("Wrote correlation matrix to {}", path.display());

    let extremes = matrix.extreme_pairs(DiagonalPolicy::Exclude);
    let extremes_with_diagonal = matrix.extreme_pairs(DiagonalPolicy::Include);
    if let Some(raw) = &extremes_with_diagonal {
        log::debug!("Extremes including self-pairs: min {} max {}", raw.min, raw.max);
    }

    Ok(CorrelationReport {
        path,
        matrix,
        extremes,
        extremes_with_diagonal,
    })
}
