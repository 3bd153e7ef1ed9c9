use std::f64::consts::PI;

use crate::error::{Result, StatsError};

use super::linspace;
use super::sample::Sample;

/// One-dimensional Gaussian kernel density estimate.
///
/// Bandwidth follows Scott's rule: `n^(-1/5)` times the sample standard
/// deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Missing values are dropped. Needs at least two distinct values.
    pub fn fit(values: &[f64]) -> Result<Self> {
        let sample = Sample::new(values)?;
        let std = sample.std();
        if std.is_nan() || std <= 0.0 {
            return Err(StatsError::ZeroVariance);
        }
        let n = sample.len() as f64;
        Ok(GaussianKde {
            bandwidth: std * n.powf(-0.2),
            points: sample.sorted().to_vec(),
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .map(|&xi| {
                let z = (x - xi) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    /// `(x, density)` pairs on `points` evenly spaced positions over `[lo, hi]`.
    pub fn evaluate_grid(&self, lo: f64, hi: f64, points: usize) -> Vec<[f64; 2]> {
        linspace(lo, hi, points)
            .into_iter()
            .map(|x| [x, self.evaluate(x)])
            .collect()
    }
}
