use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::data::loader;
use crate::data::model::Feature;
use crate::stats::descriptive::{GroupSummary, summarize_by_species};

use super::ensure_parent;

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub path: PathBuf,
    pub feature: Feature,
    pub rows: Vec<GroupSummary>,
}

/// Write the summaries with a header row and no index column.
pub fn write_summaries(rows: &[GroupSummary], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing statistics row")?;
    }
    writer.flush().context("flushing statistics table")?;
    Ok(())
}

/// Summarize `config.feature` per species and write
/// `<output_dir>/statistics.csv`.
pub fn run(config: &ReportConfig) -> Result<StatisticsReport> {
    let dataset = loader::load_bundled()?;
    let rows = summarize_by_species(&dataset, config.feature)
        .with_context(|| format!("summarizing {}", config.feature))?;

    let path = config.statistics_path();
    write_summaries(&rows, &path)?;
    log::info!(
        "Wrote {} group summaries of {} to {}",
        rows.len(),
        config.feature,
        path.display()
    );

    Ok(StatisticsReport {
        path,
        feature: config.feature,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::descriptive::summarize;

    const HEADER: &str = "label,missing,min,q1,med,q3,p95,max,mean,range,iqr,std,std_pop,mad";

    #[test]
    fn table_has_fixed_header_and_one_row_per_species() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            output_dir: dir.path().to_path_buf(),
            ..ReportConfig::default()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.feature, Feature::SepalWidth);

        let text = std::fs::read_to_string(&report.path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Setosa,0,2.3,"));
        assert!(lines[2].starts_with("Versicolor,0,2.0,"));
        assert!(lines[3].starts_with("Virginica,0,2.2,"));
    }

    #[test]
    fn undefined_statistics_are_written_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.csv");
        let row = summarize("Lonely", &[3.0]).unwrap();
        write_summaries(&[row], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert_eq!(data, "Lonely,0,3.0,3.0,3.0,3.0,3.0,3.0,3.0,0.0,0.0,,0.0,0.0");
    }

    #[test]
    fn unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = write_summaries(&[], &blocker.join("statistics.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}
