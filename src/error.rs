//! Error types for the benchmark.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur in the benchmark.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An unknown curated question set was requested.
    #[error("Unknown curated set '{0}' (valid sets: quick, medium, diagnostic)")]
    UnknownSet(String),

    /// LLM API error.
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// LLM response parsing error.
    #[error("Failed to parse LLM response: {0}")]
    LlmParse(String),

    /// An answer provider returned an error.
    #[error("Provider '{provider}' failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// An answer provider exceeded its time budget.
    #[error("Provider '{provider}' timed out after {secs}s")]
    ProviderTimeout { provider: &'static str, secs: u64 },

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl BenchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a provider error.
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(err: reqwest::Error) -> Self {
        BenchError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::LlmParse(err.to_string())
    }
}
