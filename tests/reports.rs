use iris_explorer::config::ReportConfig;
use iris_explorer::report::{correlations, statistics};
use iris_explorer::{Feature, data::loader};

fn config_in(dir: &tempfile::TempDir) -> ReportConfig {
    ReportConfig {
        output_dir: dir.path().join("dist"),
        ..ReportConfig::default()
    }
}

#[test]
fn rerunning_reports_produces_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let first_corr = correlations::run(&config).unwrap();
    let first_stats = statistics::run(&config).unwrap();
    let corr_bytes = std::fs::read(&first_corr.path).unwrap();
    let stats_bytes = std::fs::read(&first_stats.path).unwrap();

    let second_corr = correlations::run(&config).unwrap();
    let second_stats = statistics::run(&config).unwrap();
    assert_eq!(std::fs::read(&second_corr.path).unwrap(), corr_bytes);
    assert_eq!(std::fs::read(&second_stats.path).unwrap(), stats_bytes);
}

#[test]
fn both_reports_share_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let corr = correlations::run(&config).unwrap();
    let stats = statistics::run(&config).unwrap();
    assert_eq!(corr.path, dir.path().join("dist").join("correlations.csv"));
    assert_eq!(stats.path, dir.path().join("dist").join("statistics.csv"));
}

#[test]
fn extreme_pairs_are_reported_for_distinct_features() {
    let dir = tempfile::tempdir().unwrap();
    let report = correlations::run(&config_in(&dir)).unwrap();

    let ext = report.extremes.unwrap();
    assert_ne!(ext.min.first, ext.min.second);
    assert_ne!(ext.max.first, ext.max.second);
    assert_eq!(ext.max.first, Feature::PetalLength);

    let raw = report.extremes_with_diagonal.unwrap();
    assert_eq!(raw.max.first, raw.max.second);
}

#[test]
fn group_counts_cover_the_whole_table() {
    let dir = tempfile::tempdir().unwrap();
    for feature in Feature::ALL {
        let config = ReportConfig {
            feature,
            ..config_in(&dir)
        };
        let report = statistics::run(&config).unwrap();
        let covered: usize = report.rows.iter().map(|r| r.count + r.missing).sum();
        assert_eq!(covered, loader::load_bundled().unwrap().len());
    }
}
