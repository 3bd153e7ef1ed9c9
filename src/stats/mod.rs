//! Stateless statistical kernels over in-memory columns.
//!
//! Every kernel takes plain `&[f64]` slices so it works equally on a whole
//! column, a species group or a filtered view. NaN marks a missing cell and
//! is dropped before any computation.

pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod kde;
pub mod outliers;
pub mod sample;

pub use sample::Sample;

/// `points` evenly spaced values from `lo` to `hi`, both ends included.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}
