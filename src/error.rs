use thiserror::Error;

/// Failures of the statistical kernels.
///
/// Loading and report writing use `anyhow` with context instead; these
/// variants are the ones callers may want to match on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("sample has no finite values")]
    EmptySample,

    #[error("columns differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("sample has zero variance")]
    ZeroVariance,
}

pub type Result<T> = std::result::Result<T, StatsError>;
