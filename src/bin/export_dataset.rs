//! Write the bundled table to CSV, JSON and Parquet for use with the
//! viewer's *File → Open…*.

use std::path::Path;

use anyhow::{Context, Result};
use iris_explorer::data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let dataset = loader::load_bundled()?;
    let out_dir = Path::new("sample_data");
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let csv_path = out_dir.join("iris.csv");
    let json_path = out_dir.join("iris.json");
    let parquet_path = out_dir.join("iris.parquet");

    loader::write_csv(&dataset, &csv_path)?;
    loader::write_json(&dataset, &json_path)?;
    loader::write_parquet(&dataset, &parquet_path)?;

    for path in [&csv_path, &json_path, &parquet_path] {
        log::info!("Wrote {}", path.display());
    }
    println!(
        "Wrote {} records to {}",
        dataset.len(),
        out_dir.display()
    );
    Ok(())
}
