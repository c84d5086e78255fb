use caseflow_core::ProviderKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Provider key not registered: {0}")]
    UnknownProvider(ProviderKey),

    #[error("Invalid decision phase transition from {from} to {to}")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Backing service returned an empty response")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
