use cmc_scraper::ScraperConfig;
use once_cell::sync::OnceCell;
use shared_models::error::{ModelError, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub gemini_api_key: String,
    pub report_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            scraper: ScraperConfig::from_env()?,
            gemini_api_key: env::var("GEMINI_API_KEY")?,
            report_path: env::var("REPORT_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            log_format: LogFormat::from_env(),
        })
    }

    pub fn validate(self) -> Result<Self> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ModelError::Config("gemini_api_key missing".into()));
        }
        let scraper = self.scraper.validate()?;
        Ok(Self { scraper, ..self })
    }
}

static CONFIG_CELL: OnceCell<Config> = OnceCell::new();

pub fn get_config() -> Result<&'static Config> {
    CONFIG_CELL.get_or_try_init(|| {
        Config::from_env()
            .map_err(|e| ModelError::Config(format!("Environment variable error: {}", e)))
            .and_then(|config| config.validate())
    })
}
