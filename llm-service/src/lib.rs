//! Thin client layer over a local Ollama server.
//!
//! Two capabilities are exposed, matching what the retrieval pipeline needs:
//! - [`OllamaService::embeddings`] — map a string to a fixed-dimension vector
//! - [`OllamaService::chat`] — send a role-tagged message list, get text back
//!
//! Both are single blocking request/response round trips; there is no retry
//! or streaming support.

pub mod config;
pub mod error;
pub mod ollama;

pub use config::LlmConfig;
pub use error::LlmError;
pub use ollama::{ChatMessage, OllamaService, Role};
