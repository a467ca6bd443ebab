//! Text processing for document summarization.
//!
//! This module provides:
//! - Sentence-aligned, token-bounded chunking
//! - Focus-specific prompting, emphasis, and post-processing
//! - Request parameter sanitization

mod chunking;
mod validation;

/// Focus-specific generation adjustments, keyword emphasis, and
/// summary labeling.
pub mod focus;

pub use chunking::{chunk_text, ChunkingError};
pub use validation::validate_params;
