pub mod analyzer;
pub mod gemini;
pub mod prompt;

pub use analyzer::{decode_report, CryptoAnalyzer, CANDIDATE_MODELS};
pub use gemini::{ContentGenerator, GeminiClient, ModelInfo};
