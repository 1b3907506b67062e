//! Provider seams for embeddings and chat.
//!
//! Both traits use boxed futures because the real providers perform HTTP
//! requests; tests plug in synchronous stand-ins.

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::{ChatMessage, OllamaService};

use crate::errors::StoreError;

/// Provider interface for embedding generation.
///
/// The same provider (and ideally the same model identity) must be used at
/// ingestion and query time, or similarity scores become meaningless.
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

/// Provider interface for chat-capable generation.
pub trait ChatProvider: Send + Sync {
    /// Sends a role-tagged message list and returns the generated text.
    fn chat<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>>;
}

/// Ollama-backed embedding provider.
#[derive(Clone)]
pub struct OllamaEmbedder {
    svc: Arc<OllamaService>,
}

impl OllamaEmbedder {
    pub fn new(svc: Arc<OllamaService>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.svc.embeddings(text).await?) })
    }
}

/// Ollama-backed chat provider.
#[derive(Clone)]
pub struct OllamaChat {
    svc: Arc<OllamaService>,
}

impl OllamaChat {
    pub fn new(svc: Arc<OllamaService>) -> Self {
        Self { svc }
    }
}

impl ChatProvider for OllamaChat {
    fn chat<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String, StoreError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.svc.chat(messages).await?) })
    }
}
