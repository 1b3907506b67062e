//! Model invocation configuration.

/// Configuration for one Ollama model invocation profile.
///
/// The pipeline uses two instances of this: one for the embedding model and
/// one for the chat model. The embedding model must be the same at ingestion
/// and query time or similarity scores become meaningless.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model identifier string (e.g., `"nomic-embed-text"`, `"llama3.2"`).
    pub model: String,

    /// Ollama endpoint, e.g. `http://localhost:11434`.
    pub endpoint: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    /// Creates a config with no sampling overrides and a 60s timeout default
    /// applied at client construction.
    pub fn new(model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            endpoint: endpoint.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }
}
