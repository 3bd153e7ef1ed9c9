use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Feature, IrisDataset, Record, Species};

/// The measurement table shipped with the crate.
const BUNDLED_CSV: &str = include_str!("../../data/iris.csv");

const SPECIES_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled 150-row table.
pub fn load_bundled() -> Result<IrisDataset> {
    let dataset = parse_csv(csv::Reader::from_reader(BUNDLED_CSV.as_bytes()))
        .context("parsing bundled dataset")?;
    log::debug!("Loaded bundled dataset with {} records", dataset.len());
    Ok(dataset)
}

/// Load a measurement table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one Float64/Float32 column per feature, `species` as text or class code
/// * `.json`    – `[{ "sepal_length": 5.1, ..., "species": "setosa" }, ...]`
/// * `.csv`     – header row with the four feature columns and `species`
pub fn load_file(path: &Path) -> Result<IrisDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Empty feature cells are kept as NaN (missing); columns may appear in any order.
fn load_csv(path: &Path) -> Result<IrisDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<IrisDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut feature_idx = [0usize; 4];
    for feature in Feature::ALL {
        feature_idx[feature.index()] = headers
            .iter()
            .position(|h| h.parse::<Feature>().ok() == Some(feature))
            .with_context(|| format!("CSV missing '{}' column", feature.column()))?;
    }
    let species_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(SPECIES_COLUMN) || h == "target")
        .context("CSV missing 'species' column")?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut values = [f64::NAN; 4];
        for feature in Feature::ALL {
            let cell = row.get(feature_idx[feature.index()]).unwrap_or("");
            values[feature.index()] = parse_measurement(cell)
                .with_context(|| format!("Row {row_no}, {}", feature.column()))?;
        }

        let species = row
            .get(species_idx)
            .unwrap_or("")
            .parse::<Species>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Row {row_no}, species"))?;

        records.push(record_from(values, species));
    }

    Ok(IrisDataset::from_records(records))
}

fn parse_measurement(cell: &str) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("'{cell}' is not a number"))
}

/// Write the table with a header row, one record per line.
pub fn write_csv(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for record in dataset.records() {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "sepal_length": 5.1, "sepal_width": 3.5,
///     "petal_length": 1.4, "petal_width": 0.2, "species": "setosa" },
///   ...
/// ]
/// ```
///
/// `null` feature values are treated as missing.
fn load_json(path: &Path) -> Result<IrisDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut values = [f64::NAN; 4];
        for feature in Feature::ALL {
            values[feature.index()] = match obj.get(feature.column()) {
                None => bail!("Row {i}: missing '{}'", feature.column()),
                Some(JsonValue::Null) => f64::NAN,
                Some(v) => v
                    .as_f64()
                    .with_context(|| format!("Row {i}, {}: not a number", feature.column()))?,
            };
        }

        let species = match obj.get(SPECIES_COLUMN) {
            Some(JsonValue::String(s)) => s.parse::<Species>().map_err(anyhow::Error::msg)?,
            Some(JsonValue::Number(n)) => n
                .as_i64()
                .and_then(Species::from_code)
                .with_context(|| format!("Row {i}: invalid class code {n}"))?,
            _ => bail!("Row {i}: missing or invalid 'species'"),
        };

        records.push(record_from(values, species));
    }

    Ok(IrisDataset::from_records(records))
}

/// Write the table as a JSON array of records. Missing values become `null`.
pub fn write_json(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, dataset.records()).context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file with one numeric column per feature and a `species`
/// column holding either names (Utf8) or class codes (Int32/Int64).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<IrisDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(4);
        for feature in Feature::ALL {
            let idx = schema
                .index_of(feature.column())
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{}' column", feature.column()))?;
            columns.push(
                extract_f64_column(batch.column(idx))
                    .with_context(|| format!("reading '{}'", feature.column()))?,
            );
        }

        let species_idx = schema
            .index_of(SPECIES_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'species' column"))?;
        let species_col = batch.column(species_idx);

        for row in 0..batch.num_rows() {
            let species = extract_species(species_col, row)
                .with_context(|| format!("Row {row}: failed to read 'species'"))?;
            let values = [columns[0][row], columns[1][row], columns[2][row], columns[3][row]];
            records.push(record_from(values, species));
        }
    }

    Ok(IrisDataset::from_records(records))
}

/// Write the table as a single-batch Parquet file, species as names.
pub fn write_parquet(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let mut fields: Vec<Field> = Feature::ALL
        .into_iter()
        .map(|f| Field::new(f.column(), DataType::Float64, false))
        .collect();
    fields.push(Field::new(SPECIES_COLUMN, DataType::Utf8, false));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = Feature::ALL
        .into_iter()
        .map(|f| Arc::new(Float64Array::from(dataset.column(f))) as ArrayRef)
        .collect();
    let species: Vec<String> = dataset
        .records()
        .iter()
        .map(|r| r.species.name().to_ascii_lowercase())
        .collect();
    arrays.push(Arc::new(StringArray::from(species)));

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

// -- Parquet / Arrow helpers --

/// Read a Float64 or Float32 column; nulls become NaN.
fn extract_f64_column(col: &ArrayRef) -> Result<Vec<f64>> {
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect())
    } else {
        bail!("expected Float64 or Float32 column, got {:?}", col.data_type())
    }
}

fn extract_species(col: &ArrayRef, row: usize) -> Result<Species> {
    if col.is_null(row) {
        bail!("null species");
    }
    let species = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).parse::<Species>(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).parse::<Species>(),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            species_from_code(i64::from(arr.value(row)))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            species_from_code(arr.value(row))
        }
        other => bail!("unsupported species column type {other:?}"),
    };
    species.map_err(anyhow::Error::msg)
}

fn species_from_code(code: i64) -> std::result::Result<Species, String> {
    Species::from_code(code).ok_or_else(|| format!("unknown class code {code}"))
}

fn record_from(values: [f64; 4], species: Species) -> Record {
    Record {
        sepal_length: values[0],
        sepal_width: values[1],
        petal_length: values[2],
        petal_width: values[3],
        species,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_has_fifty_per_species() {
        let ds = load_bundled().unwrap();
        assert_eq!(ds.len(), 150);
        for (_, n) in ds.class_counts() {
            assert_eq!(n, 50);
        }
        assert!(ds
            .records()
            .iter()
            .all(|r| Feature::ALL.iter().all(|&f| r.value(f).is_finite())));
    }

    #[test]
    fn bundled_table_starts_and_ends_with_known_rows() {
        let ds = load_bundled().unwrap();
        let first = ds.records()[0];
        assert_eq!(
            (first.sepal_length, first.sepal_width, first.petal_length, first.petal_width),
            (5.1, 3.5, 1.4, 0.2)
        );
        assert_eq!(first.species, Species::Setosa);
        let last = ds.records()[149];
        assert_eq!(
            (last.sepal_length, last.sepal_width, last.petal_length, last.petal_width),
            (5.9, 3.0, 5.1, 1.8)
        );
        assert_eq!(last.species, Species::Virginica);
    }

    #[test]
    fn csv_empty_cells_become_missing() {
        let text = "species,petal_width,petal_length,sepal_width,sepal_length\n\
                    Iris-setosa,0.2,1.4,,5.1\n\
                    virginica,2.5,6.0,3.3,6.3\n";
        let ds = parse_csv(csv::Reader::from_reader(text.as_bytes())).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.records()[0].sepal_width.is_nan());
        assert_eq!(ds.records()[0].sepal_length, 5.1);
        assert_eq!(ds.records()[1].species, Species::Virginica);
    }

    #[test]
    fn csv_rejects_unknown_species() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    5.1,3.5,1.4,0.2,rose\n";
        let err = parse_csv(csv::Reader::from_reader(text.as_bytes())).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0, species"));
    }

    #[test]
    fn csv_requires_every_feature_column() {
        let text = "sepal_length,sepal_width,petal_length,species\n5.1,3.5,1.4,setosa\n";
        let err = parse_csv(csv::Reader::from_reader(text.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("petal_width"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn written_files_load_back() {
        let ds = load_bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        for name in ["iris.csv", "iris.json", "iris.parquet"] {
            let path = dir.path().join(name);
            match name {
                "iris.csv" => write_csv(&ds, &path).unwrap(),
                "iris.json" => write_json(&ds, &path).unwrap(),
                _ => write_parquet(&ds, &path).unwrap(),
            }
            let loaded = load_file(&path).unwrap();
            assert_eq!(loaded, ds, "{name}");
        }
    }
}
