use crate::error::{Result, StatsError};

use super::linspace;
use super::sample::Sample;

// ---------------------------------------------------------------------------
// 1D histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over the observed range. Every bin is half-open except
/// the last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn compute(values: &[f64], bins: usize) -> Result<Self> {
        let sample = Sample::new(values)?;
        let bins = bins.max(1);
        let (mut lo, mut hi) = (sample.min(), sample.max());
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let mut counts = vec![0usize; bins];
        for &v in sample.sorted() {
            if let Some(i) = bin_index(v, lo, hi, bins) {
                counts[i] += 1;
            }
        }

        Ok(Histogram {
            edges: linspace(lo, hi, bins + 1),
            counts,
        })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Bin midpoints.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin of `v` in `bins` equal bins over `[lo, hi]`, `None` outside.
fn bin_index(v: f64, lo: f64, hi: f64, bins: usize) -> Option<usize> {
    if !(lo..=hi).contains(&v) {
        return None;
    }
    let i = ((v - lo) / (hi - lo) * bins as f64) as usize;
    Some(i.min(bins - 1))
}

// ---------------------------------------------------------------------------
// 2D histogram
// ---------------------------------------------------------------------------

/// Counts over a fixed rectangular grid; pairs outside the ranges or with a
/// missing coordinate are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// `counts[i][j]` is the x-bin `i`, y-bin `j` cell.
    pub counts: Vec<Vec<usize>>,
}

impl Histogram2d {
    pub fn compute(
        xs: &[f64],
        ys: &[f64],
        bins: usize,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(StatsError::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        let bins = bins.max(1);
        let mut counts = vec![vec![0usize; bins]; bins];

        for (&x, &y) in xs.iter().zip(ys) {
            let cell = bin_index(x, x_range.0, x_range.1, bins)
                .zip(bin_index(y, y_range.0, y_range.1, bins));
            if let Some((i, j)) = cell {
                counts[i][j] += 1;
            }
        }

        Ok(Histogram2d {
            x_edges: linspace(x_range.0, x_range.1, bins + 1),
            y_edges: linspace(y_range.0, y_range.1, bins + 1),
            counts,
        })
    }

    /// Non-empty cells as `(x_lo, x_hi, y_lo, y_hi, count)`.
    pub fn occupied_cells(&self) -> Vec<(f64, f64, f64, f64, usize)> {
        let mut cells = Vec::new();
        for (i, row) in self.counts.iter().enumerate() {
            for (j, &count) in row.iter().enumerate() {
                if count > 0 {
                    cells.push((
                        self.x_edges[i],
                        self.x_edges[i + 1],
                        self.y_edges[j],
                        self.y_edges[j + 1],
                        count,
                    ));
                }
            }
        }
        cells
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::data::model::Feature;

    #[test]
    fn maximum_lands_in_last_bin() {
        let h = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.bin_width(), 1.0);
        assert_eq!(h.centers(), vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn constant_values_get_a_unit_range() {
        let h = Histogram::compute(&[2.0, 2.0], 2).unwrap();
        assert_eq!(h.edges, vec![1.5, 2.0, 2.5]);
        assert_eq!(h.counts, vec![0, 2]);
    }

    #[test]
    fn every_record_is_counted() {
        let ds = load_bundled().unwrap();
        for feature in Feature::ALL {
            let h = Histogram::compute(&ds.column(feature), 35).unwrap();
            assert_eq!(h.counts.len(), 35);
            assert_eq!(h.total(), 150);
        }
    }

    #[test]
    fn grid_ignores_points_outside_ranges() {
        let h = Histogram2d::compute(
            &[0.5, 1.5, 2.0, 5.0, f64::NAN],
            &[0.5, 0.5, 2.0, 0.5, 0.5],
            2,
            (0.0, 2.0),
            (0.0, 2.0),
        )
        .unwrap();
        assert_eq!(h.counts, vec![vec![1, 0], vec![1, 1]]);
        assert_eq!(h.max_count(), 1);
        assert_eq!(h.occupied_cells().len(), 3);
    }

    #[test]
    fn petal_by_sepal_length_grid_holds_whole_table() {
        let ds = load_bundled().unwrap();
        let h = Histogram2d::compute(
            &ds.column(Feature::PetalLength),
            &ds.column(Feature::SepalLength),
            35,
            (0.0, 7.0),
            (4.0, 8.0),
        )
        .unwrap();
        let total: usize = h.counts.iter().flatten().sum();
        assert_eq!(total, 150);
    }
}
