//! Model adapter interfaces.
//!
//! The summarization core treats the underlying sequence-to-sequence model
//! as a black-box capability: given text and generation parameters, return
//! generated text. Implementations wrap a tokenizer and an inference
//! runtime; the core never reimplements either.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Concrete adapter for Ollama-style HTTP inference endpoints.
pub mod ollama;

pub use ollama::{OllamaAdapter, OllamaConfig};

/// Errors surfaced by a model adapter.
///
/// Kinds are structural so that callers route on the variant, never on the
/// message text. Adapters that only see textual errors from their backing
/// service translate them into these kinds at their own boundary.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// Weight fetch or initialization failed
    #[error("model load failed: {0}")]
    LoadFailed(String),

    /// `generate` was called before a successful `load`
    #[error("model not loaded")]
    NotLoaded,

    /// The inference runtime ran out of memory
    #[error("generation ran out of memory: {0}")]
    OutOfMemory(String),

    /// The inference service is unreachable or still starting up
    #[error("model service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Tokenization failed
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// Generation failed at runtime for any other reason
    #[error("generation failed: {0}")]
    Generation(String),
}

impl ModelError {
    /// Whether a retry with more conservative parameters could plausibly
    /// succeed. Load and tokenization faults are fatal for the request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OutOfMemory(_) | Self::ServiceUnavailable(_) | Self::Generation(_)
        )
    }
}

/// Tunable knobs for one generation call.
///
/// Derived once per request from the validated length and focus
/// preferences; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens
    pub max_new_tokens: usize,

    /// Lower bound on generated tokens
    pub min_new_tokens: usize,

    /// Beam search width
    pub num_beams: usize,

    /// Exponential penalty to the sequence length (>1 favors longer output)
    pub length_penalty: f32,

    /// Penalty applied to repeated tokens
    pub repetition_penalty: f32,

    /// Forbid repeating any n-gram of this size, if set
    pub no_repeat_ngram_size: Option<usize>,

    /// Stop beam search as soon as enough finished candidates exist
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 200,
            min_new_tokens: 80,
            num_beams: 4,
            length_penalty: 1.0,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: None,
            early_stopping: true,
        }
    }
}

/// Adapter over a pretrained summarization model and its tokenizer.
///
/// The adapter is a single shared, non-reentrant resource: calls are made
/// strictly sequentially by the pipeline, and concurrent use from multiple
/// requests must be serialized externally unless a given implementation
/// documents otherwise.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Load model weights. Lazy and idempotent: calling `load` on an
    /// already-loaded adapter is a no-op.
    async fn load(&self) -> Result<(), ModelError>;

    /// Whether `load` has completed successfully.
    fn is_ready(&self) -> bool;

    /// Number of model tokens in `text`.
    fn token_count(&self, text: &str) -> Result<usize, ModelError>;

    /// Generate text from `prompt` using the given parameters.
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, ModelError>;
}
