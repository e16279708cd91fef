use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

/// Failures that abort an import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not decode document as UTF-8 or UTF-16: {0}")]
    Decode(String),
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ImportError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}
