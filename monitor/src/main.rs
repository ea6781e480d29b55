use analyzer::CryptoAnalyzer;
use monitor::{
    config::{get_config, LogFormat},
    pipeline::run_pipeline,
};
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    info!("--- Starting crypto market monitor ---");

    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            error!(%e, "Configuration error");
            return Err(e.into());
        }
    };

    let analyzer = CryptoAnalyzer::with_api_key(&config.gemini_api_key)?;
    let scraper_config = config.scraper.clone();

    let outcome = run_pipeline(
        move || cmc_scraper::scan(scraper_config),
        &analyzer,
        config.report_path.as_deref(),
    )
    .await
    .inspect_err(|e| error!(%e, "Monitoring run failed"))?;

    let Some(outcome) = outcome else {
        warn!("No data collected, nothing to analyze");
        return Ok(());
    };

    info!(model = %outcome.model, run_id = %outcome.run_id, "Market report ready");
    println!("{}", serde_json::to_string_pretty(&outcome.report)?);

    Ok(())
}
