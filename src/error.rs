//! Domain-specific error types for quick-answer

use thiserror::Error;

use crate::clients::LlmError;

/// Main error type for the quick-answer server
#[derive(Error, Debug)]
pub enum QuickAnswerError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Tokenizer error: {message}")]
    Tokenizer { message: String },

    #[error("LLM error: {message}")]
    Llm { message: String },

    #[error("HTTP server error: {message}")]
    Http { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for QuickAnswerError {
    fn from(err: anyhow::Error) -> Self {
        QuickAnswerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for QuickAnswerError {
    fn from(err: serde_json::Error) -> Self {
        QuickAnswerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for QuickAnswerError {
    fn from(err: toml::de::Error) -> Self {
        QuickAnswerError::Config {
            message: format!("Invalid TOML: {}", err),
        }
    }
}

impl From<reqwest::Error> for QuickAnswerError {
    fn from(err: reqwest::Error) -> Self {
        QuickAnswerError::Llm {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<std::io::Error> for QuickAnswerError {
    fn from(err: std::io::Error) -> Self {
        QuickAnswerError::Http {
            message: err.to_string(),
        }
    }
}

impl From<LlmError> for QuickAnswerError {
    fn from(err: LlmError) -> Self {
        QuickAnswerError::Llm {
            message: err.to_string(),
        }
    }
}

impl From<regex::Error> for QuickAnswerError {
    fn from(err: regex::Error) -> Self {
        QuickAnswerError::Tokenizer {
            message: format!("Invalid tokenizer rule: {}", err),
        }
    }
}

/// Result type alias for quick-answer operations
pub type Result<T> = std::result::Result<T, QuickAnswerError>;
