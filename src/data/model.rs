use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Species – the categorical label
// ---------------------------------------------------------------------------

/// One of the three iris classes.
///
/// The derived `Ord` follows declaration order, which is also alphabetical,
/// so grouping by species yields the same order as a sorted group-by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Capitalized label used in reports (`"Setosa"`).
    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "Setosa",
            Species::Versicolor => "Versicolor",
            Species::Virginica => "Virginica",
        }
    }

    /// Integer class code (0, 1, 2).
    pub fn code(self) -> u8 {
        match self {
            Species::Setosa => 0,
            Species::Versicolor => 1,
            Species::Virginica => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Species> {
        match code {
            0 => Some(Species::Setosa),
            1 => Some(Species::Versicolor),
            2 => Some(Species::Virginica),
            _ => None,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = String;

    /// Accepts `setosa`, `Setosa`, `Iris-setosa` and the class codes `0`..`2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Species::from_code(code).ok_or_else(|| format!("unknown class code {code}"));
        }
        let lower = trimmed.to_ascii_lowercase();
        let name = lower.strip_prefix("iris-").unwrap_or(&lower);
        match name {
            "setosa" => Ok(Species::Setosa),
            "versicolor" => Ok(Species::Versicolor),
            "virginica" => Ok(Species::Virginica),
            _ => Err(format!("unknown species '{trimmed}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Feature – one numeric column
// ---------------------------------------------------------------------------

/// The four measurement columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    /// Column name in files (`sepal_length`).
    pub fn column(self) -> &'static str {
        match self {
            Feature::SepalLength => "sepal_length",
            Feature::SepalWidth => "sepal_width",
            Feature::PetalLength => "petal_length",
            Feature::PetalWidth => "petal_width",
        }
    }

    /// Axis and title label (`Sepal length`).
    pub fn label(self) -> &'static str {
        match self {
            Feature::SepalLength => "Sepal length",
            Feature::SepalWidth => "Sepal width",
            Feature::PetalLength => "Petal length",
            Feature::PetalWidth => "Petal width",
        }
    }

    /// Position in `Feature::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Feature {
    type Err = String;

    /// Accepts `sepal_length` as well as `sepal length (cm)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .trim_end_matches("(cm)")
            .trim()
            .to_ascii_lowercase()
            .replace(' ', "_");
        Feature::ALL
            .into_iter()
            .find(|f| f.column() == normalized)
            .ok_or_else(|| format!("unknown feature '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single flower: four measurements in centimetres and its class.
///
/// A measurement is NaN only when the cell was empty in a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: Species,
}

impl Record {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SepalLength => self.sepal_length,
            Feature::SepalWidth => self.sepal_width,
            Feature::PetalLength => self.petal_length,
            Feature::PetalWidth => self.petal_width,
        }
    }
}

// ---------------------------------------------------------------------------
// IrisDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full table, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct IrisDataset {
    records: Vec<Record>,
}

impl IrisDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        IrisDataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one column in record order, NaN cells included.
    pub fn column(&self, feature: Feature) -> Vec<f64> {
        self.records.iter().map(|r| r.value(feature)).collect()
    }

    /// Values of one column at the given record indices.
    pub fn column_at(&self, feature: Feature, indices: &[usize]) -> Vec<f64> {
        indices
            .iter()
            .map(|&i| self.records[i].value(feature))
            .collect()
    }

    /// Indices of the records belonging to `species`.
    pub fn species_indices(&self, species: Species) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.species == species)
            .map(|(i, _)| i)
            .collect()
    }

    /// One column partitioned by species, in species order.
    ///
    /// Species with no records are omitted.
    pub fn group_by_species(&self, feature: Feature) -> Vec<(Species, Vec<f64>)> {
        Species::ALL
            .into_iter()
            .filter_map(|sp| {
                let values: Vec<f64> = self
                    .records
                    .iter()
                    .filter(|r| r.species == sp)
                    .map(|r| r.value(feature))
                    .collect();
                (!values.is_empty()).then_some((sp, values))
            })
            .collect()
    }

    /// Record count per species, every species present (possibly zero).
    pub fn class_counts(&self) -> [(Species, usize); 3] {
        Species::ALL.map(|sp| (sp, self.records.iter().filter(|r| r.species == sp).count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_parses_common_spellings() {
        assert_eq!("setosa".parse::<Species>(), Ok(Species::Setosa));
        assert_eq!("Iris-versicolor".parse::<Species>(), Ok(Species::Versicolor));
        assert_eq!(" Virginica ".parse::<Species>(), Ok(Species::Virginica));
        assert_eq!("2".parse::<Species>(), Ok(Species::Virginica));
        assert!("3".parse::<Species>().is_err());
        assert!("rose".parse::<Species>().is_err());
    }

    #[test]
    fn feature_parses_column_and_unit_forms() {
        assert_eq!("sepal_width".parse::<Feature>(), Ok(Feature::SepalWidth));
        assert_eq!("petal length (cm)".parse::<Feature>(), Ok(Feature::PetalLength));
        assert!("stem_length".parse::<Feature>().is_err());
    }

    #[test]
    fn feature_index_matches_table_order() {
        for (i, f) in Feature::ALL.into_iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn group_by_species_skips_empty_classes() {
        let rec = |v: f64, species| Record {
            sepal_length: v,
            sepal_width: v,
            petal_length: v,
            petal_width: v,
            species,
        };
        let ds = IrisDataset::from_records(vec![
            rec(1.0, Species::Virginica),
            rec(2.0, Species::Setosa),
            rec(3.0, Species::Virginica),
        ]);

        let groups = ds.group_by_species(Feature::PetalWidth);
        assert_eq!(
            groups,
            vec![
                (Species::Setosa, vec![2.0]),
                (Species::Virginica, vec![1.0, 3.0]),
            ]
        );
        assert_eq!(ds.class_counts()[1], (Species::Versicolor, 0));
        assert_eq!(ds.species_indices(Species::Virginica), vec![0, 2]);
    }
}
