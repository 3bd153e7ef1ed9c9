use anyhow::Result;
use iris_explorer::config::ReportConfig;
use iris_explorer::report::correlations;

fn main() -> Result<()> {
    env_logger::init();

    let report = correlations::run(&ReportConfig::default()).inspect_err(|e| {
        log::error!("Correlation report failed: {e:#}");
    })?;

    match report.extremes {
        Some(ext) => {
            println!("Pair of features with minimum absolute correlation: {}", ext.min);
            println!("Pair of features with maximum absolute correlation: {}", ext.max);
        }
        None => println!("No defined correlation between distinct features"),
    }
    Ok(())
}
