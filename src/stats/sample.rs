use crate::error::{Result, StatsError};

// ---------------------------------------------------------------------------
// Sample – sorted finite values of one column
// ---------------------------------------------------------------------------

/// The finite values of a column, sorted ascending, plus how many cells were
/// missing (NaN or infinite) and therefore dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    sorted: Vec<f64>,
    missing: usize,
}

impl Sample {
    /// Fails with [`StatsError::EmptySample`] when no finite value remains.
    pub fn new(values: &[f64]) -> Result<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Err(StatsError::EmptySample);
        }
        sorted.sort_by(f64::total_cmp);
        Ok(Sample {
            missing: values.len() - sorted.len(),
            sorted,
        })
    }

    /// Number of present values.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Number of dropped cells.
    pub fn missing(&self) -> usize {
        self.missing
    }

    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    /// Quantile at `p` in `[0, 1]`, linear interpolation between the closest
    /// ranks at position `p · (n − 1)`.
    ///
    /// The interpolation is evaluated from the nearer neighbour, as NumPy's
    /// default method does, so results agree to the last bit.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        let n = self.sorted.len();
        let pos = p * (n - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let t = pos - lo as f64;
        let (a, b) = (self.sorted[lo], self.sorted[hi]);
        let diff = b - a;
        if t >= 0.5 {
            b - diff * (1.0 - t)
        } else {
            a + diff * t
        }
    }

    /// Middle value, or the mean of the two middle values for even `n`.
    pub fn median(&self) -> f64 {
        median_of_sorted(&self.sorted)
    }

    pub fn q1(&self) -> f64 {
        self.quantile(0.25)
    }

    pub fn q3(&self) -> f64 {
        self.quantile(0.75)
    }

    /// Interquartile range, `q3 − q1`.
    pub fn iqr(&self) -> f64 {
        self.q3() - self.q1()
    }

    pub fn mean(&self) -> f64 {
        self.sorted.iter().sum::<f64>() / self.sorted.len() as f64
    }

    /// Sum of squared deviations from the mean.
    fn sum_sq_dev(&self) -> f64 {
        let mean = self.mean();
        self.sorted.iter().map(|v| (v - mean).powi(2)).sum()
    }

    /// Sample standard deviation (divisor `n − 1`). NaN for a single value.
    pub fn std(&self) -> f64 {
        let n = self.sorted.len();
        if n < 2 {
            return f64::NAN;
        }
        (self.sum_sq_dev() / (n - 1) as f64).sqrt()
    }

    /// Population standard deviation (divisor `n`).
    pub fn std_pop(&self) -> f64 {
        (self.sum_sq_dev() / self.sorted.len() as f64).sqrt()
    }

    /// Median absolute deviation from the median (unscaled).
    pub fn mad(&self) -> f64 {
        let median = self.median();
        let mut deviations: Vec<f64> = self.sorted.iter().map(|v| (v - median).abs()).collect();
        deviations.sort_by(f64::total_cmp);
        median_of_sorted(&deviations)
    }

    /// `(position, value)` pairs for a quantile plot, position `(i − 0.5) / N`
    /// for the i-th smallest value (1-based).
    pub fn plotting_positions(&self) -> Vec<[f64; 2]> {
        let n = self.sorted.len() as f64;
        self.sorted
            .iter()
            .enumerate()
            .map(|(i, &v)| [(i as f64 + 0.5) / n, v])
            .collect()
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_or_all_missing_is_rejected() {
        assert_eq!(Sample::new(&[]), Err(StatsError::EmptySample));
        assert_eq!(Sample::new(&[f64::NAN, f64::NAN]), Err(StatsError::EmptySample));
    }

    #[test]
    fn missing_cells_are_counted_and_dropped() {
        let s = Sample::new(&[3.0, f64::NAN, 1.0, 2.0]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.missing(), 1);
        assert_eq!(s.sorted(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let s = Sample::new(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(close(s.quantile(0.25), 1.75));
        assert!(close(s.quantile(0.5), 2.5));
        assert!(close(s.quantile(0.75), 3.25));
        assert_eq!(s.quantile(0.0), 1.0);
        assert_eq!(s.quantile(1.0), 4.0);
    }

    #[test]
    fn single_value_sample() {
        let s = Sample::new(&[2.5]).unwrap();
        assert_eq!(s.quantile(0.95), 2.5);
        assert_eq!(s.median(), 2.5);
        assert!(s.std().is_nan());
        assert_eq!(s.std_pop(), 0.0);
        assert_eq!(s.mad(), 0.0);
    }

    #[test]
    fn dispersion_measures() {
        let s = Sample::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(s.mean(), 5.0));
        assert!(close(s.std_pop(), 2.0));
        assert!(close(s.std(), (32.0f64 / 7.0).sqrt()));
        // deviations from median 4.5: 2.5 0.5 0.5 0.5 0.5 0.5 2.5 4.5
        assert!(close(s.mad(), 0.5));
    }

    #[test]
    fn plotting_positions_are_centred() {
        let s = Sample::new(&[10.0, 30.0, 20.0, 40.0]).unwrap();
        assert_eq!(
            s.plotting_positions(),
            vec![[0.125, 10.0], [0.375, 20.0], [0.625, 30.0], [0.875, 40.0]]
        );
    }

    proptest! {
        #[test]
        fn order_statistics_are_monotone(values in prop::collection::vec(-1e6f64..1e6, 1..200)) {
            let s = Sample::new(&values).unwrap();
            prop_assert!(s.min() <= s.q1());
            prop_assert!(s.q1() <= s.median());
            prop_assert!(s.median() <= s.q3());
            prop_assert!(s.q3() <= s.quantile(0.95));
            prop_assert!(s.quantile(0.95) <= s.max());
            prop_assert!(s.iqr() >= 0.0);
            prop_assert!(s.mad() >= 0.0);
        }

        #[test]
        fn population_std_never_exceeds_sample_std(values in prop::collection::vec(-1e3f64..1e3, 2..100)) {
            let s = Sample::new(&values).unwrap();
            prop_assert!(s.std_pop() <= s.std());
        }
    }
}
