//! Unified error type for Ollama calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`crate::OllamaService`].
#[derive(Debug, Error)]
pub enum LlmError {
    /// Invalid endpoint (empty or missing http/https).
    #[error("invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("failed to decode response: {0}")]
    Decode(String),
}
