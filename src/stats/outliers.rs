use crate::error::{Result, StatsError};

use super::sample::Sample;

// ---------------------------------------------------------------------------
// Tukey fences
// ---------------------------------------------------------------------------

/// Boxplot outlier thresholds, `q1 − 1.5·IQR` and `q3 + 1.5·IQR`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyFences {
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFences {
    pub const K: f64 = 1.5;

    pub fn from_sample(sample: &Sample) -> Self {
        let (q1, q3) = (sample.q1(), sample.q3());
        let iqr = q3 - q1;
        TukeyFences {
            lower: q1 - Self::K * iqr,
            upper: q3 + Self::K * iqr,
        }
    }

    /// Strictly outside the fences. Missing values are never outliers.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

// ---------------------------------------------------------------------------
// Box statistics along one axis
// ---------------------------------------------------------------------------

/// Box and whisker positions of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpread {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lower fence clipped to the observed minimum.
    pub lower_whisker: f64,
    /// Upper fence clipped to the observed maximum.
    pub upper_whisker: f64,
    pub fences: TukeyFences,
}

impl AxisSpread {
    pub fn from_sample(sample: &Sample) -> Self {
        let fences = TukeyFences::from_sample(sample);
        AxisSpread {
            q1: sample.q1(),
            median: sample.median(),
            q3: sample.q3(),
            lower_whisker: fences.lower.max(sample.min()),
            upper_whisker: fences.upper.min(sample.max()),
            fences,
        }
    }
}

/// Classic one-column box: whiskers reach the most extreme values still
/// inside the fences, everything beyond is listed as an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn compute(values: &[f64]) -> Result<Self> {
        let sample = Sample::new(values)?;
        let fences = TukeyFences::from_sample(&sample);
        let (inside, outliers): (Vec<f64>, Vec<f64>) =
            sample.sorted().iter().partition(|&&v| !fences.is_outlier(v));

        // q1 and q3 always lie inside the fences, so `inside` is never empty
        let lower_whisker = inside.first().copied().unwrap_or(sample.q1());
        let upper_whisker = inside.last().copied().unwrap_or(sample.q3());

        Ok(BoxStats {
            q1: sample.q1(),
            median: sample.median(),
            q3: sample.q3(),
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

// ---------------------------------------------------------------------------
// Two-column box summary
// ---------------------------------------------------------------------------

/// Box positions on two axes plus the records flagged on either axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary2d {
    pub x: AxisSpread,
    pub y: AxisSpread,
    /// Indices into the input columns, ascending.
    pub outliers: Vec<usize>,
}

impl BoxSummary2d {
    pub fn compute(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(StatsError::LengthMismatch {
                left: xs.len(),
                right: ys.len(),
            });
        }
        let x = AxisSpread::from_sample(&Sample::new(xs)?);
        let y = AxisSpread::from_sample(&Sample::new(ys)?);

        let outliers = xs
            .iter()
            .zip(ys)
            .enumerate()
            .filter(|(_, (&xv, &yv))| x.fences.is_outlier(xv) || y.fences.is_outlier(yv))
            .map(|(i, _)| i)
            .collect();

        Ok(BoxSummary2d { x, y, outliers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::data::model::Feature;

    #[test]
    fn fences_follow_quartiles() {
        let s = Sample::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let f = TukeyFences::from_sample(&s);
        assert_eq!((f.lower, f.upper), (-1.0, 7.0));
        assert!(f.is_outlier(7.5));
        assert!(!f.is_outlier(7.0));
        assert!(!f.is_outlier(f64::NAN));
    }

    #[test]
    fn whiskers_clip_to_observed_range() {
        let s = Sample::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let spread = AxisSpread::from_sample(&s);
        assert_eq!(spread.lower_whisker, 1.0);
        assert_eq!(spread.upper_whisker, 5.0);

        let s = Sample::new(&[1.0, 2.0, 2.0, 3.0, 50.0]).unwrap();
        let spread = AxisSpread::from_sample(&s);
        // q1 = 2, q3 = 3, upper fence 4.5 < max
        assert_eq!(spread.upper_whisker, 4.5);
        assert_eq!(spread.lower_whisker, 1.0);
    }

    #[test]
    fn box_stats_whiskers_stop_at_data() {
        let b = BoxStats::compute(&[1.0, 2.0, 2.0, 3.0, 50.0]).unwrap();
        assert_eq!(b.upper_whisker, 3.0);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.outliers, vec![50.0]);
    }

    #[test]
    fn sepal_width_has_four_outliers_petal_length_none() {
        let ds = load_bundled().unwrap();
        let xs = ds.column(Feature::PetalLength);
        let ys = ds.column(Feature::SepalWidth);
        let summary = BoxSummary2d::compute(&xs, &ys).unwrap();

        assert_eq!(summary.outliers, vec![15, 32, 33, 60]);
        let flagged: Vec<f64> = summary.outliers.iter().map(|&i| ys[i]).collect();
        assert_eq!(flagged, vec![4.4, 4.1, 4.2, 2.0]);
        assert!(xs.iter().all(|&v| !summary.x.fences.is_outlier(v)));
        assert_eq!(summary.x.lower_whisker, 1.0);
        assert_eq!(summary.x.upper_whisker, 6.9);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        assert_eq!(
            BoxSummary2d::compute(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { left: 2, right: 1 })
        );
    }
}
