use thiserror::Error;

use crate::model::ModelError;
use crate::pipeline::PipelineError;
use crate::processing::ChunkingError;
use crate::summarizer::SummarizeError;

/// Top-level error type aggregating the failure modes of every module.
#[derive(Debug, Error)]
pub enum Error {
    /// Model adapter errors (load, tokenization, generation)
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Text chunking errors
    #[error("Chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Summarization errors
    #[error("Summarization error: {0}")]
    Summarize(#[from] SummarizeError),

    /// Pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
