//! Chunk-summarize-merge pipeline for legal documents.
//!
//! The [`LegalSummarizer`] orchestrates the full flow: request validation,
//! keyword emphasis, chunking, per-chunk generation with a three-tier
//! degradation ladder, recursive merging, focus post-processing, word-limit
//! enforcement, and confidence scoring. Every failure mode past input
//! validation is absorbed into a degraded-but-usable result; a partial,
//! lower-quality summary is always preferred over an aborted pipeline.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::model::{GenerationParams, ModelAdapter, ModelError};
use crate::processing::{chunk_text, focus, validate_params, ChunkingError};
use crate::types::{Focus, SummaryLength, SummaryParams, SummaryResult, ValidatedParams};

/// Prefix tagging results produced by the emergency extractive path.
pub const EXTRACTIVE_TAG: &str = "[Extractive Summary]";

/// Fixed confidence score for emergency extractive summaries.
const EXTRACTIVE_CONFIDENCE: f32 = 0.3;

/// Confidence multiplier applied when any fallback tier was used.
const DEGRADED_FACTOR: f32 = 0.8;

/// Errors surfaced to the caller of [`LegalSummarizer::summarize`].
///
/// Empty input is the one hard failure; every other fault is degraded
/// internally and only visible through the result's confidence score.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Document text was empty or whitespace-only
    #[error("no readable text found in document")]
    EmptyInput,
}

/// Configuration for the summarization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Model context budget: maximum tokens per chunk
    pub max_chunk_tokens: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 1024,
        }
    }
}

/// Outcome of summarizing one chunk.
#[derive(Debug, Clone)]
pub struct ChunkOutcome {
    /// Summary text for the chunk
    pub text: String,
    /// Whether a fallback tier produced this outcome
    pub degraded: bool,
    /// Whether the text came from extractive truncation rather than
    /// the model
    pub extractive: bool,
}

/// Summarization engine for legal documents.
///
/// Owns no global state: the model adapter is injected at construction
/// and shared read-only across sequential calls.
pub struct LegalSummarizer {
    adapter: Arc<dyn ModelAdapter>,
    config: SummarizerConfig,
}

impl LegalSummarizer {
    /// Create a summarizer with the default configuration.
    pub fn new(adapter: Arc<dyn ModelAdapter>) -> Self {
        Self::with_config(adapter, SummarizerConfig::default())
    }

    /// Create a summarizer with a custom configuration.
    pub fn with_config(adapter: Arc<dyn ModelAdapter>, config: SummarizerConfig) -> Self {
        Self { adapter, config }
    }

    /// Load the underlying model. Idempotent; must complete before the
    /// first `summarize` call can use the generative path.
    pub async fn load(&self) -> Result<(), ModelError> {
        self.adapter.load().await
    }

    /// Whether the underlying model has been loaded.
    pub fn is_ready(&self) -> bool {
        self.adapter.is_ready()
    }

    /// Generation parameters derived from the validated length and focus.
    fn generation_params(length: SummaryLength, focus_area: Focus) -> GenerationParams {
        let (max_new_tokens, min_new_tokens) = match length {
            SummaryLength::Brief => (100, 30),
            SummaryLength::Standard => (200, 80),
            SummaryLength::Detailed => (400, 150),
        };

        let mut params = GenerationParams {
            max_new_tokens,
            min_new_tokens,
            num_beams: 4,
            early_stopping: true,
            ..GenerationParams::default()
        };
        focus::apply_overrides(&mut params, focus_area);
        params
    }

    /// Conservative parameters for the first fallback tier: a narrower
    /// beam, moderate length bounds, and no focus adjustments.
    fn fallback_params() -> GenerationParams {
        GenerationParams {
            max_new_tokens: 150,
            min_new_tokens: 50,
            num_beams: 2,
            length_penalty: 1.0,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: None,
            early_stopping: true,
        }
    }

    /// Moderate parameters for the direct merge pass.
    fn merge_params() -> GenerationParams {
        GenerationParams {
            max_new_tokens: 200,
            min_new_tokens: 100,
            ..GenerationParams::default()
        }
    }

    /// Moderate parameters for per-sub-chunk summarization during a
    /// recursive merge.
    fn merge_subchunk_params() -> GenerationParams {
        GenerationParams {
            max_new_tokens: 150,
            min_new_tokens: 50,
            ..GenerationParams::default()
        }
    }

    /// Generate a summary of `text` with the given customization.
    ///
    /// Fails only for empty or whitespace-only input. All other failure
    /// modes degrade: chunk-level model faults fall down the retry ladder,
    /// merge faults fall back to concatenation, and anything unexpected
    /// produces an extractive summary tagged with [`EXTRACTIVE_TAG`] and a
    /// fixed low confidence score.
    pub async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
        filename: &str,
    ) -> Result<SummaryResult, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let validated = validate_params(params);
        let started = Instant::now();

        match self.run_pipeline(text, &validated, filename, started).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(error = %e, "summarization pipeline failed, using extractive fallback");
                Ok(self.extractive_result(text, &validated, filename, started))
            }
        }
    }

    /// The generative pipeline. Errors escaping this function are caught
    /// by `summarize` and turned into an extractive fallback result.
    async fn run_pipeline(
        &self,
        text: &str,
        params: &ValidatedParams,
        filename: &str,
        started: Instant,
    ) -> Result<SummaryResult, ChunkingError> {
        let gen_params = Self::generation_params(params.length, params.focus);

        // Emphasis runs over the whole text before chunking so markers stay
        // chunk-local and token accounting sees the inserted markers.
        let emphasized = focus::emphasize(text, params.focus);
        let chunks = chunk_text(&emphasized, self.config.max_chunk_tokens, self.adapter.as_ref())?;

        info!(
            chunks = chunks.len(),
            focus = ?params.focus,
            length = ?params.length,
            "summarizing document"
        );

        let mut outcomes = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            debug!(chunk = i + 1, total = chunks.len(), "summarizing chunk");
            outcomes.push(self.summarize_chunk(chunk, params.focus, &gen_params).await);
        }

        // If the model never produced output, the "summary" is already
        // purely extractive; report it honestly as one instead of merging
        // truncated chunk fragments.
        if outcomes.iter().all(|o| o.extractive) {
            warn!("model produced no chunk summaries, reporting extractive result");
            return Ok(self.extractive_result(text, params, filename, started));
        }

        let total_chunks = outcomes.len();
        let successful_chunks = outcomes.iter().filter(|o| !o.degraded).count();
        let mut any_degraded = successful_chunks < total_chunks;

        let summaries: Vec<String> = outcomes.into_iter().map(|o| o.text).collect();
        let (merged, merge_degraded) = self.merge_summaries(&summaries).await;
        any_degraded |= merge_degraded;

        let summary = focus::post_process(&merged, params.focus);
        let (summary, word_count) = apply_word_cap(summary, params.max_words);

        let base = if total_chunks == 0 {
            0.0
        } else {
            successful_chunks as f32 / total_chunks as f32
        };
        let factor = if any_degraded { DEGRADED_FACTOR } else { 1.0 };
        let confidence_score = (base * factor).clamp(0.0, 1.0);

        Ok(SummaryResult {
            original_filename: filename.to_string(),
            summary_text: summary,
            processing_time_secs: started.elapsed().as_secs_f64(),
            word_count,
            confidence_score,
            generated_at: Utc::now(),
        })
    }

    /// Summarize one chunk through the three-tier degradation ladder.
    ///
    /// Never fails: tier one is the focus-adjusted model call, tier two a
    /// retry with conservative defaults on the unprefixed chunk, tier
    /// three extractive truncation. The chunk text arrives
    /// already-emphasized; only the prompt prefix is added here.
    async fn summarize_chunk(
        &self,
        chunk: &str,
        focus_area: Focus,
        params: &GenerationParams,
    ) -> ChunkOutcome {
        let prompt = format!("{}\n\n{}", focus::prompt_prefix(focus_area), chunk);
        match self.adapter.generate(&prompt, params).await {
            Ok(text) => {
                return ChunkOutcome {
                    text,
                    degraded: false,
                    extractive: false,
                }
            }
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "focused generation failed, retrying with default parameters");
            }
            Err(e) => {
                warn!(error = %e, "focused generation failed fatally, using extractive sentences");
                return extractive_chunk(chunk);
            }
        }

        match self.adapter.generate(chunk, &Self::fallback_params()).await {
            Ok(text) => {
                info!("fallback parameters succeeded for chunk");
                ChunkOutcome {
                    text,
                    degraded: true,
                    extractive: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "fallback generation failed, using extractive sentences");
                extractive_chunk(chunk)
            }
        }
    }

    /// Combine chunk summaries into one coherent summary.
    ///
    /// Returns the merged text and whether the merge degraded. Zero or one
    /// summaries short-circuit without a model call. A concatenation that
    /// still exceeds the context budget is re-chunked at half budget to
    /// leave headroom, and each sub-chunk is summarized with moderate,
    /// non-focus-adjusted parameters; merging is a coherence pass, not a
    /// focus pass. Any failure degrades to space-joined concatenation.
    pub async fn merge_summaries(&self, summaries: &[String]) -> (String, bool) {
        if summaries.is_empty() {
            return (String::new(), false);
        }
        if summaries.len() == 1 {
            return (summaries[0].clone(), false);
        }

        let combined = summaries.join(" ");

        let combined_tokens = match self.adapter.token_count(&combined) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "token counting failed during merge, keeping concatenation");
                return (combined, true);
            }
        };

        if combined_tokens > self.config.max_chunk_tokens {
            let sub_chunks = match chunk_text(
                &combined,
                self.config.max_chunk_tokens / 2,
                self.adapter.as_ref(),
            ) {
                Ok(chunks) => chunks,
                Err(e) => {
                    warn!(error = %e, "re-chunking failed during merge, keeping concatenation");
                    return (combined, true);
                }
            };

            let mut parts = Vec::with_capacity(sub_chunks.len());
            let mut degraded = false;
            for sub_chunk in &sub_chunks {
                match self
                    .adapter
                    .generate(sub_chunk, &Self::merge_subchunk_params())
                    .await
                {
                    Ok(text) => parts.push(text),
                    Err(e) => {
                        warn!(error = %e, "failed to summarize sub-chunk during merge");
                        parts.push(truncate_chars(sub_chunk, 200));
                        degraded = true;
                    }
                }
            }
            (parts.join(" "), degraded)
        } else {
            match self.adapter.generate(&combined, &Self::merge_params()).await {
                Ok(text) => (text, false),
                Err(e) => {
                    warn!(error = %e, "merge summarization failed, keeping concatenation");
                    (combined, true)
                }
            }
        }
    }

    /// Build an extractive summary from the leading sentences of the raw
    /// text. Used when generative summarization is unavailable; never
    /// fails.
    fn extractive_result(
        &self,
        text: &str,
        params: &ValidatedParams,
        filename: &str,
        started: Instant,
    ) -> SummaryResult {
        let sentences: Vec<&str> = text
            .split(". ")
            .take(params.length.sentence_budget())
            .collect();
        let mut summary = sentences.join(". ");
        if !summary.ends_with('.') {
            summary.push('.');
        }

        let (summary, _) = apply_word_cap(summary, params.max_words);
        let summary_text = format!("{EXTRACTIVE_TAG} {summary}");
        let word_count = summary_text.split_whitespace().count();

        SummaryResult {
            original_filename: filename.to_string(),
            summary_text,
            processing_time_secs: started.elapsed().as_secs_f64(),
            word_count,
            confidence_score: EXTRACTIVE_CONFIDENCE,
            generated_at: Utc::now(),
        }
    }
}

/// Extractive tier-three fallback for a single chunk: its first three
/// sentences, period-terminated.
fn extractive_chunk(chunk: &str) -> ChunkOutcome {
    let sentences: Vec<&str> = chunk.split(". ").take(3).collect();
    let mut text = sentences.join(". ");
    if !text.ends_with('.') {
        text.push('.');
    }
    ChunkOutcome {
        text,
        degraded: true,
        extractive: true,
    }
}

/// Enforce the word limit, appending an ellipsis marker when truncating.
///
/// Returns the capped text and its recomputed word count; applying the cap
/// to already-capped text is a no-op. Truncation is word-based and may cut
/// mid-sentence; no punctuation cleanup beyond the marker is attempted.
fn apply_word_cap(summary: String, max_words: usize) -> (String, usize) {
    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() > max_words {
        let capped = format!("{}...", words[..max_words].join(" "));
        let word_count = capped.split_whitespace().count();
        (capped, word_count)
    } else {
        let word_count = words.len();
        (summary, word_count)
    }
}

/// Truncate to a character budget, appending an ellipsis marker.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
