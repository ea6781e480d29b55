//! Shared fixtures for the end-to-end pipeline tests.

use cmc_scraper::{PageDriver, ScraperConfig, WaitUntil};
use shared_models::error::{ModelError, Result};
use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

pub const COMMUNITY_URL: &str = "https://cmc.test/community/";
pub const GAINERS_URL: &str = "https://cmc.test/gainers-losers/";
pub const NEWS_URL: &str = "https://cmc.test/headlines/news/";

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        community_url: COMMUNITY_URL.into(),
        gainers_url: GAINERS_URL.into(),
        news_url: NEWS_URL.into(),
        headless: true,
        scroll_attempts: 3,
        scroll_delay: Duration::ZERO,
        scroll_step_px: 3000,
        user_agent: cmc_scraper::config::DEFAULT_USER_AGENT.into(),
    }
}

/// In-memory pages keyed by URL and selector, standing in for Chromium.
#[derive(Debug, Default, Clone)]
pub struct StaticSite {
    current: String,
    pages: HashMap<(String, String), Vec<String>>,
    unreachable: Vec<String>,
    pub visited: Vec<String>,
    pub scrolls: u32,
}

impl StaticSite {
    pub fn with_page(mut self, url: &str, selector: &str, texts: Vec<String>) -> Self {
        self.pages.insert((url.to_string(), selector.to_string()), texts);
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_string());
        self
    }

    /// A site shaped like CoinMarketCap: 100 movement rows, a news page full of
    /// menu noise, and a community feed.
    pub fn coinmarketcap() -> Self {
        let rows = (1..=100)
            .map(|i| {
                if i <= 50 {
                    format!("{i}\nGAIN{i}\n${i}.00\n+{}%", 100 - i)
                } else {
                    format!("{i}\nLOSE{i}\n${i}.00\n-{}%", i - 50)
                }
            })
            .collect();

        let mut news: Vec<String> = vec![
            "Log In".into(),
            "Leaderboards".into(),
            "Recently Added".into(),
            "Copyright © 2026 CoinMarketCap. All rights reserved.".into(),
        ];
        news.extend((1..=20).map(|i| format!("Headline {i}: Bitcoin miners move reserves amid volatility")));
        news.push("Headline 1: Bitcoin miners move reserves amid volatility".into());

        let posts = vec![
            "gm".to_string(),
            "Show more".to_string(),
            "SOL is breaking out, the chart looks incredibly bullish to me".to_string(),
            "Everyone is panic selling their alts, blood in the streets today".to_string(),
            "Followers 12.3K Following 80 — crypto trader since 2017".to_string(),
        ];

        StaticSite::default()
            .with_page(GAINERS_URL, "table tbody tr", rows)
            .with_page(NEWS_URL, "a, h2, h3, p", news)
            .with_page(COMMUNITY_URL, r#"div[dir="auto"], p"#, posts)
    }
}

impl PageDriver for StaticSite {
    fn goto(&mut self, url: &str, _wait: WaitUntil) -> Result<()> {
        if self.unreachable.iter().any(|u| u == url) {
            return Err(ModelError::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {url}")));
        }
        self.current = url.to_string();
        self.visited.push(url.to_string());
        Ok(())
    }

    fn scroll_by(&mut self, _dy: i64) -> Result<()> {
        self.scrolls += 1;
        Ok(())
    }

    fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>> {
        Ok(self
            .pages
            .get(&(self.current.clone(), selector.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn pause(&mut self, _duration: Duration) {}
}

/// A Gemini `generateContent` body wrapping `text` as the single candidate.
pub fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
    .to_string()
}
