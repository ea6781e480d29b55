use anyhow::Result;
use cmc_scraper::{filter, ChromeSession, CmcScraper, ScraperConfig};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

const PREVIEW_POSTS: usize = 10;
const PREVIEW_CHARS: usize = 150;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting crypto community scraper");

    let config = ScraperConfig::load()?;
    let session = ChromeSession::launch(config.headless, &config.user_agent)?;
    let scroll_attempts = config.scroll_attempts;
    let mut scraper = CmcScraper::new(session, config);
    let posts = scraper.run(scroll_attempts)?;

    println!("\n{}", "=".repeat(40));
    println!("      RESULT: {} POSTS COLLECTED      ", posts.len());
    println!("{}", "=".repeat(40));

    if posts.is_empty() {
        warn!("No posts were collected. Check the selectors or the connection.");
        return Ok(());
    }

    println!("\n--- Sample (top {PREVIEW_POSTS}) ---");
    for (i, post) in posts.iter().take(PREVIEW_POSTS).enumerate() {
        println!("[{}] {}...", i + 1, filter::preview(post, PREVIEW_CHARS));
        println!("{}", "-".repeat(20));
    }

    Ok(())
}
