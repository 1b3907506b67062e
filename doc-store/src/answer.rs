//! Context-grounded answering over retrieved chunks.
//!
//! No algorithmic complexity of its own beyond template assembly: retrieval
//! quality and the model's instruction-following bound the result.

use std::fmt::Write;

use llm_service::ChatMessage;
use tracing::debug;

use crate::config::StoreConfig;
use crate::embed::{ChatProvider, EmbeddingsProvider};
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::SearchHit;
use crate::retrieve;

/// Separator placed between chunk texts in the context block.
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// The fallback the model is instructed to give when the context is
/// insufficient.
pub const UNKNOWN_ANSWER: &str = "I don't know based on these documents.";

/// Retrieves context chunks for `question`, assembles a grounded prompt, and
/// delegates generation to the chat model.
///
/// Returns the generated answer together with the chunks it was grounded on.
///
/// # Errors
/// Retrieval errors (including `CollectionMissing`) and chat failures.
pub(crate) async fn answer_question(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    question: &str,
    n_context_chunks: u64,
    embedder: &dyn EmbeddingsProvider,
    chat: &dyn ChatProvider,
) -> Result<(String, Vec<SearchHit>), StoreError> {
    let chunks = retrieve::search(cfg, client, question, n_context_chunks, embedder).await?;
    debug!("answer_question: {} context chunks retrieved", chunks.len());

    let prompt = build_prompt(question, &chunks);
    let messages = [ChatMessage::user(prompt)];
    let answer = chat.chat(&messages).await?;

    Ok((answer, chunks))
}

/// Builds a prompt that restricts the model to the supplied chunks.
pub fn build_prompt(question: &str, chunks: &[SearchHit]) -> String {
    let context = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    let mut s = String::with_capacity(context.len() + question.len() + 256);
    writeln!(
        s,
        "You are an assistant that answers questions using ONLY the context below."
    )
    .ok();
    writeln!(s, "If the context does not contain the answer, say:").ok();
    writeln!(s, "\"{UNKNOWN_ANSWER}\"").ok();
    writeln!(s).ok();
    writeln!(s, "Context:").ok();
    writeln!(s, "{context}").ok();
    writeln!(s).ok();
    writeln!(s, "Question: {question}").ok();
    writeln!(s).ok();
    write!(s, "Answer in a concise way.").ok();
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str) -> SearchHit {
        SearchHit {
            text: text.to_string(),
            source: "a.txt".to_string(),
            chunk_index: 0,
            distance: Some(0.1),
        }
    }

    #[test]
    fn prompt_contains_context_question_and_fallback() {
        let prompt = build_prompt("What is X?", &[hit("X is a thing."), hit("More on X.")]);
        assert!(prompt.contains("X is a thing."));
        assert!(prompt.contains("More on X."));
        assert!(prompt.contains("Question: What is X?"));
        assert!(prompt.contains(UNKNOWN_ANSWER));
    }

    #[test]
    fn chunks_are_separated() {
        let prompt = build_prompt("q", &[hit("first"), hit("second")]);
        assert!(prompt.contains("first\n\n---\n\nsecond"));
    }

    #[test]
    fn empty_context_still_forms_a_prompt() {
        let prompt = build_prompt("q", &[]);
        assert!(prompt.contains("Context:"));
        assert!(prompt.contains("Question: q"));
    }
}
