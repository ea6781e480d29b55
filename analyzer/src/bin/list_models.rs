use analyzer::GeminiClient;
use anyhow::{Context, Result};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Keeps the flash-tier Gemini models, the only ones worth falling back to.
fn is_flash_model(name: &str) -> bool {
    name.contains("gemini") && name.contains("flash")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    let client = GeminiClient::new(api_key)?;

    println!("--- AVAILABLE MODELS ({}...) ---", client.key_hint());

    match client.list_models().await {
        Ok(models) => {
            for model in models.iter().filter(|m| is_flash_model(&m.name)) {
                println!("✅ {}", model.name);
            }
        }
        Err(e) => error!(%e, "Failed to list models"),
    }

    Ok(())
}
