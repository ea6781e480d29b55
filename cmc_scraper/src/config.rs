use shared_models::error::{ModelError, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_SCROLL_ATTEMPTS: u32 = 50;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub community_url: String,
    pub gainers_url: String,
    pub news_url: String,
    pub headless: bool,
    pub scroll_attempts: u32,
    pub scroll_delay: Duration,
    pub scroll_step_px: i64,
    pub user_agent: String,
}

impl ScraperConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(ScraperConfig {
            community_url: env::var("CMC_URL")?,
            gainers_url: env::var("CMC_URL_GAINERS")?,
            news_url: env::var("CMC_URL_NEWS")?,
            headless: env::var("SCRAPER_HEADLESS")
                .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
                .unwrap_or(true),
            scroll_attempts: env::var("SCROLL_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            scroll_delay: Duration::from_millis(
                env::var("SCROLL_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            scroll_step_px: env::var("SCROLL_STEP_PX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            user_agent: env::var("SCRAPER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    pub fn validate(self) -> Result<Self> {
        macro_rules! ensure {
            ($cond:expr, $msg:expr) => {
                if !$cond {
                    return Err(ModelError::Config($msg.into()));
                }
            };
        }

        for (name, value) in [
            ("CMC_URL", &self.community_url),
            ("CMC_URL_GAINERS", &self.gainers_url),
            ("CMC_URL_NEWS", &self.news_url),
        ] {
            ensure!(!value.trim().is_empty(), format!("{name} missing"));
            let parsed = Url::parse(value)
                .map_err(|e| ModelError::Config(format!("{name} is not a valid URL: {e}")))?;
            ensure!(
                matches!(parsed.scheme(), "http" | "https"),
                format!("{name} must be an http(s) URL")
            );
        }
        ensure!(
            self.scroll_attempts <= MAX_SCROLL_ATTEMPTS,
            format!("scroll_attempts must be <= {MAX_SCROLL_ATTEMPTS}")
        );
        ensure!(self.scroll_step_px > 0, "scroll_step_px must be > 0");
        ensure!(!self.user_agent.is_empty(), "user_agent missing");

        Ok(self)
    }

    /// Reads and validates in one go, folding env errors into `ModelError`.
    pub fn load() -> Result<Self> {
        Self::from_env()
            .map_err(|e| ModelError::Config(format!("Environment variable error: {}", e)))
            .and_then(|config| config.validate())
    }
}
