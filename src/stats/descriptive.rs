use serde::Serialize;

use crate::data::model::{Feature, IrisDataset};
use crate::error::Result;

use super::sample::Sample;

// ---------------------------------------------------------------------------
// GroupSummary – one row of the statistics table
// ---------------------------------------------------------------------------

/// Summary statistics of one feature within one label group.
///
/// Field order is the column order of the written table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    /// Present values; not part of the written table.
    #[serde(skip)]
    pub count: usize,
    /// Cells of the group with no value.
    pub missing: usize,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub min: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub q1: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub med: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub q3: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub p95: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub max: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub mean: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub range: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub iqr: f64,
    /// Sample standard deviation (n − 1).
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub std: f64,
    /// Population standard deviation (n).
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub std_pop: f64,
    #[serde(serialize_with = "crate::report::finite_or_empty")]
    pub mad: f64,
}

/// Summarize one group's values. NaN cells count as missing.
pub fn summarize(label: &str, values: &[f64]) -> Result<GroupSummary> {
    let sample = Sample::new(values)?;
    let (min, max) = (sample.min(), sample.max());
    let (q1, q3) = (sample.q1(), sample.q3());

    Ok(GroupSummary {
        label: label.to_string(),
        count: sample.len(),
        missing: sample.missing(),
        min,
        q1,
        med: sample.median(),
        q3,
        p95: sample.quantile(0.95),
        max,
        mean: sample.mean(),
        range: max - min,
        iqr: q3 - q1,
        std: sample.std(),
        std_pop: sample.std_pop(),
        mad: sample.mad(),
    })
}

/// One [`GroupSummary`] per species present in the dataset, in species order.
pub fn summarize_by_species(dataset: &IrisDataset, feature: Feature) -> Result<Vec<GroupSummary>> {
    dataset
        .group_by_species(feature)
        .into_iter()
        .map(|(species, values)| summarize(species.name(), &values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::error::StatsError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sepal_width_by_species_matches_known_values() {
        let ds = load_bundled().unwrap();
        let rows = summarize_by_species(&ds, Feature::SepalWidth).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Setosa", "Versicolor", "Virginica"]);

        let setosa = &rows[0];
        assert_eq!(setosa.missing, 0);
        assert_eq!(setosa.min, 2.3);
        assert_eq!(setosa.max, 4.4);
        assert!(close(setosa.q1, 3.2));
        assert!(close(setosa.med, 3.4));
        assert!(close(setosa.q3, 3.675));
        assert!(close(setosa.p95, 4.055));
        assert!(close(setosa.mean, 3.428));
        assert!(close(setosa.std, 0.379_064_369));
        assert!(close(setosa.std_pop, 0.375_254_580));
        assert!(close(setosa.mad, 0.25));

        let versicolor = &rows[1];
        assert_eq!((versicolor.min, versicolor.max), (2.0, 3.4));
        assert!(close(versicolor.q1, 2.525));
        assert!(close(versicolor.mean, 2.77));
        assert!(close(versicolor.mad, 0.2));

        let virginica = &rows[2];
        assert_eq!((virginica.min, virginica.max), (2.2, 3.8));
        assert!(close(virginica.q3, 3.175));
        assert!(close(virginica.p95, 3.51));
        assert!(close(virginica.std, 0.322_496_638));
    }

    #[test]
    fn every_group_satisfies_order_invariants() {
        let ds = load_bundled().unwrap();
        for feature in Feature::ALL {
            let rows = summarize_by_species(&ds, feature).unwrap();
            let mut total = 0;
            for row in &rows {
                assert!(row.min <= row.q1 && row.q1 <= row.med && row.med <= row.q3);
                assert!(row.q3 <= row.max);
                assert_eq!(row.range, row.max - row.min);
                assert_eq!(row.iqr, row.q3 - row.q1);
                assert!(row.std_pop <= row.std);
                total += row.count + row.missing;
            }
            assert_eq!(total, ds.len());
        }
    }

    #[test]
    fn missing_values_are_excluded_from_statistics() {
        let row = summarize("g", &[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(row.missing, 1);
        assert_eq!(row.count, 2);
        assert_eq!(row.med, 2.0);
        assert_eq!(row.range, 2.0);
    }

    #[test]
    fn group_without_values_is_an_error() {
        assert_eq!(summarize("g", &[f64::NAN]), Err(StatsError::EmptySample));
    }
}
