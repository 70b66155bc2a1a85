//! Error types for generation

use thiserror::Error;
use vitallm_tokenizer::TokenizerError;

/// Result type for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur during one generation call.
///
/// Every error is scoped to the call that raised it; no state survives the
/// call, so a failed generation never affects the next one.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Tokenization error: {0}")]
    Tokenization(#[from] TokenizerError),

    #[error("Generation worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
