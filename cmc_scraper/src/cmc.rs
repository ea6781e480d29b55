use crate::browser::{PageDriver, WaitUntil};
use crate::config::ScraperConfig;
use crate::filter;
use chrono::Utc;
use shared_models::error::Result;
use shared_models::{DataPackage, MarketMovements, SourceType};
use tracing::{error, info, warn};

const MOVEMENT_ROWS_SELECTOR: &str = "table tbody tr";
const HEADLINE_SELECTOR: &str = "a, h2, h3, p";
const POST_SELECTOR: &str = r#"div[dir="auto"], p"#;

/// Walks the CoinMarketCap gainers, news and community pages with one browser
/// session.
pub struct CmcScraper<D: PageDriver> {
    driver: D,
    config: ScraperConfig,
}

impl<D: PageDriver> CmcScraper<D> {
    pub fn new(driver: D, config: ScraperConfig) -> Self {
        Self { driver, config }
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Assumes the gainers & losers page is already loaded.
    pub fn extract_gainers_losers(&mut self) -> MarketMovements {
        info!("Extracting gainers & losers");
        match self.driver.inner_texts(MOVEMENT_ROWS_SELECTOR) {
            Ok(rows) => filter::split_movements(&rows),
            Err(e) => {
                error!(%e, "Failed to read movement tables");
                MarketMovements::default()
            }
        }
    }

    /// Assumes the news page is already loaded.
    pub fn extract_news(&mut self) -> Result<Vec<String>> {
        info!("Extracting news headlines");
        let candidates = self.driver.inner_texts(HEADLINE_SELECTOR)?;
        Ok(filter::filter_headlines(candidates))
    }

    pub fn extract_community(&mut self, scrolls: u32) -> Result<Vec<String>> {
        info!(scrolls, "Extracting community posts");
        self.load_community(scrolls)?;
        let candidates = self.driver.inner_texts(POST_SELECTOR)?;
        Ok(filter::filter_community(candidates))
    }

    /// Gainers, news, then community. A failure stops the walk and whatever was
    /// collected so far is returned.
    pub fn run_comprehensive_scan(&mut self) -> DataPackage {
        let mut package = DataPackage::default();

        if let Err(e) = self.scan_into(&mut package) {
            error!(%e, "Scraping flow aborted");
        }

        package.collected_at = Utc::now();
        info!(
            gainers = package.market_movements.gainers.len(),
            losers = package.market_movements.losers.len(),
            news = package.count(SourceType::News),
            posts = package.count(SourceType::Community),
            "Comprehensive scan finished"
        );
        package
    }

    fn scan_into(&mut self, package: &mut DataPackage) -> Result<()> {
        let gainers_url = self.config.gainers_url.clone();
        self.driver.goto(&gainers_url, WaitUntil::DomContentLoaded)?;
        package.market_movements = self.extract_gainers_losers();

        let news_url = self.config.news_url.clone();
        self.driver.goto(&news_url, WaitUntil::DomContentLoaded)?;
        package.latest_news = self.extract_news()?;

        package.community_posts = self.extract_community(self.config.scroll_attempts)?;
        Ok(())
    }

    /// Community feed only, with the stricter post length window and dedupe.
    pub fn run(&mut self, scroll_attempts: u32) -> Result<Vec<String>> {
        info!(scroll_attempts, "Collecting community posts");
        self.load_community(scroll_attempts)?;
        let raw = self.driver.inner_texts(POST_SELECTOR)?;
        let raw_count = raw.len();
        let posts = filter::filter_posts(raw);
        if posts.is_empty() {
            warn!(raw_count, "No post survived filtering");
        } else {
            info!(raw_count, kept = posts.len(), "Posts collected");
        }
        Ok(posts)
    }

    fn load_community(&mut self, scrolls: u32) -> Result<()> {
        let url = self.config.community_url.clone();
        self.driver.goto(&url, WaitUntil::NetworkIdle)?;
        for _ in 0..scrolls {
            self.driver.scroll_by(self.config.scroll_step_px)?;
            self.driver.pause(self.config.scroll_delay);
        }
        Ok(())
    }
}
