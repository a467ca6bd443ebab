//! lexsum - legal document summarization over a fixed-context-window model
//!
//! This library implements a chunk-summarize-merge pipeline that lets a
//! pretrained sequence-to-sequence summarization model process documents
//! larger than its context window, with focus-driven prompt and parameter
//! adaptation and graceful degradation under model failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Module declarations
/// Core value types and configuration.
///
/// Contains:
/// - Request parameter types (raw and validated)
/// - The summary result type
/// - Error types and Result alias
/// - UI customization catalogue
pub mod types;

/// Model adapter interfaces and implementations.
///
/// Provides:
/// - The `ModelAdapter` trait wrapping tokenizer and inference runtime
/// - Generation parameter types
/// - Typed model error kinds
/// - An Ollama-style HTTP adapter
pub mod model;

/// Text processing for summarization.
///
/// Provides:
/// - Sentence-aligned token-bounded chunking
/// - Focus-specific emphasis, prompting, and post-processing
/// - Request parameter sanitization
pub mod processing;

/// The chunk-summarize-merge pipeline core.
///
/// Provides:
/// - Per-chunk summarization with a three-tier degradation ladder
/// - Recursive merging of partial summaries
/// - Orchestration, word-limit enforcement, and confidence scoring
pub mod summarizer;

/// Processing state machine and statistics wrapper.
pub mod pipeline;

// Re-exports
pub use crate::model::{GenerationParams, ModelAdapter, ModelError};
pub use crate::pipeline::{Pipeline, PipelineStats, ProcessingState};
pub use crate::summarizer::{LegalSummarizer, SummarizeError, SummarizerConfig, EXTRACTIVE_TAG};
pub use crate::types::{
    customization_options, Error, Focus, Result, SummaryLength, SummaryParams, SummaryResult,
    ValidatedParams,
};
