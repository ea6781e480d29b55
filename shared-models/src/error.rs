use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Serialization Error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration Error: {0}")]
    Config(String),
    #[error("Browser Error: {0}")]
    Browser(String),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Analysis Error: {0}")]
    Analysis(String),
}

pub type Result<T, E = ModelError> = std::result::Result<T, E>;
