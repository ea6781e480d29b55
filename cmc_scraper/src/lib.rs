pub mod browser;
pub mod cmc;
pub mod config;
pub mod filter;

pub use browser::{ChromeSession, PageDriver, WaitUntil};
pub use cmc::CmcScraper;
pub use config::ScraperConfig;

/// Launches Chromium per `config` and runs the full three-source scan.
pub fn scan(config: ScraperConfig) -> shared_models::error::Result<shared_models::DataPackage> {
    let session = ChromeSession::launch(config.headless, &config.user_agent)?;
    let mut scraper = CmcScraper::new(session, config);
    Ok(scraper.run_comprehensive_scan())
}
