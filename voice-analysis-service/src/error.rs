use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Patient info failed the pre-flight checks; no network call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote endpoint answered with a non-success status
    #[error("{0}")]
    Transport(String),

    /// The remote endpoint answered 2xx but the body is not usable
    #[error("Invalid API response: {0}")]
    ResponseShape(String),

    /// Requested recording does not exist
    #[error("Recording not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
