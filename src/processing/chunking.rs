use thiserror::Error;
use tracing::debug;

use crate::model::{ModelAdapter, ModelError};

/// Errors that can occur during text chunking
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Token counting failed in the model adapter
    #[error("token counting failed: {0}")]
    TokenCount(#[from] ModelError),
}

/// Splits text into sentence-aligned chunks bounded by a token budget.
///
/// Sentences are never sub-split: a single sentence whose token count
/// exceeds `max_tokens` is emitted as its own oversized chunk, trading
/// strict token adherence for sentence-level coherence. The result is
/// computed eagerly and preserves sentence order.
///
/// Empty input yields one empty chunk; callers validate input upstream.
///
/// # Arguments
/// * `text` - The text to chunk
/// * `max_tokens` - Maximum tokens per chunk
/// * `adapter` - Model adapter supplying token counts
pub fn chunk_text(
    text: &str,
    max_tokens: usize,
    adapter: &dyn ModelAdapter,
) -> Result<Vec<String>, ChunkingError> {
    // Short documents skip the splitting overhead entirely.
    if adapter.token_count(text)? <= max_tokens {
        return Ok(vec![text.to_string()]);
    }

    let sentences: Vec<&str> = text.split(". ").collect();
    let last = sentences.len() - 1;

    let mut chunks = Vec::new();
    let mut current_chunk = String::new();
    let mut current_tokens = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        // The final fragment keeps the text's own terminal punctuation.
        let fragment = if i < last {
            format!("{sentence}. ")
        } else {
            (*sentence).to_string()
        };
        let fragment_tokens = adapter.token_count(&fragment)?;

        if current_tokens + fragment_tokens > max_tokens && !current_chunk.is_empty() {
            chunks.push(current_chunk.trim().to_string());
            current_chunk = fragment;
            current_tokens = fragment_tokens;
        } else {
            current_chunk.push_str(&fragment);
            current_tokens += fragment_tokens;
        }
    }

    if !current_chunk.trim().is_empty() {
        chunks.push(current_chunk.trim().to_string());
    }

    debug!(chunks = chunks.len(), max_tokens, "chunked document");

    Ok(chunks)
}
