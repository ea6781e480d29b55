use crate::gemini::{ContentGenerator, GeminiClient};
use crate::prompt::build_market_prompt;
use serde_json::Value;
use shared_models::error::{ModelError, Result};
use shared_models::{DataPackage, MarketReport};
use std::env;
use tracing::{error, info, warn};

/// Tried in order; the first model that returns a decodable report wins.
pub const CANDIDATE_MODELS: &[&str] = &[
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash",
    "models/gemini-1.5-flash",
];

pub struct CryptoAnalyzer<G: ContentGenerator = GeminiClient> {
    generator: G,
    models: Vec<String>,
}

impl CryptoAnalyzer<GeminiClient> {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ModelError::Config("GEMINI_API_KEY missing".into()))?;
        Self::with_api_key(&api_key)
    }

    pub fn with_api_key(api_key: &str) -> Result<Self> {
        Ok(Self::new(GeminiClient::new(api_key)?))
    }
}

impl<G: ContentGenerator> CryptoAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            models: CANDIDATE_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Returns the answering model and its report, or `None` when there was
    /// nothing to analyze or every candidate failed.
    pub async fn analyze_market_health(&self, package: &DataPackage) -> Option<(String, MarketReport)> {
        if package.is_empty() {
            warn!("Empty data package, skipping analysis");
            return None;
        }

        let prompt = match build_market_prompt(package) {
            Ok(p) => p,
            Err(e) => {
                error!(%e, "Failed to build prompt");
                return None;
            }
        };

        for model in &self.models {
            info!(%model, "Analyzing market data");
            let attempt = match self.generator.generate(model, &prompt).await {
                Ok(text) => decode_report(&text),
                Err(e) => Err(e),
            };
            match attempt {
                Ok(report) => {
                    info!(%model, "Analysis complete");
                    return Some((model.clone(), report));
                }
                Err(e) => {
                    warn!(%model, %e, "Model failed, trying next");
                }
            }
        }

        error!(tried = self.models.len(), "All candidate models failed");
        None
    }
}

/// Decodes a model answer into a report. Code fences are tolerated; anything
/// that is not a JSON object is rejected.
pub fn decode_report(text: &str) -> Result<MarketReport> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    if !value.is_object() {
        return Err(ModelError::Analysis(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop an info string such as `json` on the opening fence.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
