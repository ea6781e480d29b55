use analyzer::{ContentGenerator, CryptoAnalyzer};
use shared_models::error::{ModelError, Result};
use shared_models::{AnalysisOutcome, DataPackage, SourceType};
use std::path::Path;
use tracing::{info, warn};

/// Runs a blocking scan off the async workers. The browser API is synchronous.
pub async fn collect<F>(scan: F) -> Result<DataPackage>
where
    F: FnOnce() -> Result<DataPackage> + Send + 'static,
{
    tokio::task::spawn_blocking(scan)
        .await
        .map_err(|e| ModelError::Browser(format!("Scan task panicked: {}", e)))?
}

/// Scan → analysis → optional report file.
///
/// `Ok(None)` means the scan came back empty and nothing was sent to the
/// model. A scan with data that no model could analyze is an error.
pub async fn run_pipeline<F, G>(
    scan: F,
    analyzer: &CryptoAnalyzer<G>,
    report_path: Option<&Path>,
) -> Result<Option<AnalysisOutcome>>
where
    F: FnOnce() -> Result<DataPackage> + Send + 'static,
    G: ContentGenerator,
{
    let package = collect(scan).await?;
    info!(
        movements = package.count(SourceType::MarketMovements),
        news = package.count(SourceType::News),
        posts = package.count(SourceType::Community),
        "Data collected"
    );

    if package.is_empty() {
        warn!("Nothing was collected. Check the selectors or the connection.");
        return Ok(None);
    }

    let (model, report) = analyzer
        .analyze_market_health(&package)
        .await
        .ok_or_else(|| ModelError::Analysis("no candidate model produced a report".into()))?;

    let outcome = AnalysisOutcome::new(model, report, package);
    if let Some(path) = report_path {
        write_outcome(&outcome, path).await?;
        info!(path = %path.display(), run_id = %outcome.run_id, "Report written");
    }

    Ok(Some(outcome))
}

pub async fn write_outcome(outcome: &AnalysisOutcome, path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(outcome)?;
    tokio::fs::write(path, payload).await?;
    Ok(())
}
