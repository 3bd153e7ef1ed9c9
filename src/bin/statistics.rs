use anyhow::Result;
use iris_explorer::config::ReportConfig;
use iris_explorer::report::statistics;

fn main() -> Result<()> {
    env_logger::init();

    let report = statistics::run(&ReportConfig::default()).inspect_err(|e| {
        log::error!("Statistics report failed: {e:#}");
    })?;

    println!(
        "Wrote {} rows of {} statistics to {}",
        report.rows.len(),
        report.feature,
        report.path.display()
    );
    Ok(())
}
