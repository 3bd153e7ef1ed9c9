use std::fmt;

use crate::data::model::{Feature, IrisDataset};
use crate::error::{Result, StatsError};

/// Pearson product-moment correlation of two equally long columns.
///
/// Rows where either value is missing are dropped pairwise. Returns NaN
/// when fewer than two complete rows remain or either column is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return Ok(f64::NAN);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut dx = 0.0;
    let mut dy = 0.0;

    for (x, y) in &pairs {
        let a = x - mean_x;
        let b = y - mean_y;
        cov += a * b;
        dx += a * a;
        dy += b * b;
    }

    let divisor = (dx * dy).sqrt();
    if divisor == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((cov / divisor).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// CorrelationMatrix
// ---------------------------------------------------------------------------

/// Symmetric 4×4 Pearson matrix over the measurement columns, indexed in
/// [`Feature::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f64; 4]; 4],
}

impl CorrelationMatrix {
    pub fn compute(dataset: &IrisDataset) -> Result<Self> {
        let columns = Feature::ALL.map(|f| dataset.column(f));
        let mut values = [[f64::NAN; 4]; 4];

        for i in 0..4 {
            for j in 0..=i {
                let r = pearson(&columns[i], &columns[j])?;
                // self-correlation is exactly one unless the column is degenerate
                let r = if i == j && !r.is_nan() { 1.0 } else { r };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix { values })
    }

    pub fn get(&self, a: Feature, b: Feature) -> f64 {
        self.values[a.index()][b.index()]
    }

    /// Rows in feature order.
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.values
    }

    /// Every entry paired with its features, row-major.
    fn stacked(&self) -> impl Iterator<Item = FeaturePair> + '_ {
        Feature::ALL.into_iter().flat_map(move |a| {
            Feature::ALL.into_iter().map(move |b| FeaturePair {
                first: a,
                second: b,
                value: self.get(a, b),
            })
        })
    }

    /// The pairs with the smallest and the largest absolute correlation.
    ///
    /// Entries are scanned row-major; on ties the first pair wins. NaN
    /// entries are skipped. Returns `None` when no entry qualifies.
    pub fn extreme_pairs(&self, policy: DiagonalPolicy) -> Option<ExtremePairs> {
        let mut candidates = self.stacked().filter(|p| !p.value.is_nan()).filter(|p| match policy {
            DiagonalPolicy::Include => true,
            DiagonalPolicy::Exclude => p.first.index() < p.second.index(),
        });

        let first = candidates.next()?;
        let (mut min, mut max) = (first, first);
        for pair in candidates {
            if pair.value.abs() < min.value.abs() {
                min = pair;
            }
            if pair.value.abs() > max.value.abs() {
                max = pair;
            }
        }
        Some(ExtremePairs { min, max })
    }
}

/// Whether self-pairs take part in the extreme-pair search.
///
/// With `Include` the maximum is always a diagonal entry (1.0), which says
/// nothing about the data; `Exclude` restricts the search to distinct
/// features (upper triangle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalPolicy {
    Include,
    #[default]
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePair {
    pub first: Feature,
    pub second: Feature,
    pub value: f64,
}

impl fmt::Display for FeaturePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) r = {:.4}", self.first, self.second, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremePairs {
    pub min: FeaturePair,
    pub max: FeaturePair,
}
