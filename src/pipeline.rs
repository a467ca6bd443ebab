//! Processing pipeline wrapper around the summarizer.
//!
//! Tracks a per-document processing state machine and running statistics
//! for an orchestration layer or UI to display. Text extraction happens
//! upstream; the pipeline consumes already-extracted text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::ModelError;
use crate::summarizer::{LegalSummarizer, SummarizeError};
use crate::types::{SummaryParams, SummaryResult};

/// States of the document processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    /// No document in flight
    Idle,
    /// Model weights are being loaded
    LoadingModel,
    /// A summary is being generated
    Summarizing,
    /// The last document completed successfully
    Complete,
    /// The last document failed
    Error,
}

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Model loading failed before summarization could start
    #[error("model loading failed: {0}")]
    ModelLoad(#[from] ModelError),

    /// Summarization rejected the input
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

/// Running statistics across processed documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Number of documents successfully processed
    pub documents_processed: u64,

    /// Total time spent summarizing, in seconds
    pub total_processing_secs: f64,

    /// Mean time per successfully processed document, in seconds
    pub average_processing_secs: f64,

    /// Number of documents that failed
    pub errors_encountered: u64,

    /// When the last document was processed
    pub last_processed: Option<DateTime<Utc>>,
}

impl PipelineStats {
    fn record_success(&mut self, processing_secs: f64) {
        self.documents_processed += 1;
        self.total_processing_secs += processing_secs;
        self.average_processing_secs =
            self.total_processing_secs / self.documents_processed as f64;
        self.last_processed = Some(Utc::now());
    }
}

/// Check if a state transition is valid
fn is_valid_transition(from: ProcessingState, to: ProcessingState) -> bool {
    use ProcessingState::*;
    match (from, to) {
        (Idle, LoadingModel) | (Idle, Summarizing) => true,
        (LoadingModel, Summarizing) | (LoadingModel, Error) => true,
        (Summarizing, Complete) | (Summarizing, Error) => true,
        // A finished pipeline accepts the next document or goes idle.
        (Complete, LoadingModel) | (Complete, Summarizing) | (Complete, Idle) => true,
        (Error, LoadingModel) | (Error, Summarizing) | (Error, Idle) => true,
        _ => false,
    }
}

/// Document processing pipeline.
///
/// Owns a [`LegalSummarizer`], lazily loads its model before first use,
/// and maintains state and statistics across sequential documents.
pub struct Pipeline {
    summarizer: LegalSummarizer,
    state: RwLock<ProcessingState>,
    stats: RwLock<PipelineStats>,
}

impl Pipeline {
    /// Create a pipeline around an existing summarizer.
    pub fn new(summarizer: LegalSummarizer) -> Self {
        Self {
            summarizer,
            state: RwLock::new(ProcessingState::Idle),
            stats: RwLock::new(PipelineStats::default()),
        }
    }

    async fn set_state(&self, to: ProcessingState) {
        let mut state = self.state.write().await;
        if !is_valid_transition(*state, to) {
            // State is advisory; a skipped transition is worth a log line
            // but must not fail document processing.
            warn!(from = ?*state, to = ?to, "unexpected pipeline state transition");
        }
        *state = to;
    }

    /// Current pipeline state.
    pub async fn state(&self) -> ProcessingState {
        *self.state.read().await
    }

    /// Whether a document is currently in flight.
    pub async fn is_processing(&self) -> bool {
        matches!(
            self.state().await,
            ProcessingState::LoadingModel | ProcessingState::Summarizing
        )
    }

    /// Snapshot of the running statistics.
    pub async fn stats(&self) -> PipelineStats {
        self.stats.read().await.clone()
    }

    /// Reset the running statistics.
    pub async fn reset_stats(&self) {
        *self.stats.write().await = PipelineStats::default();
    }

    /// Preload the model so the first document does not pay the loading
    /// cost.
    pub async fn preload_model(&self) -> Result<(), PipelineError> {
        if self.summarizer.is_ready() {
            return Ok(());
        }
        self.set_state(ProcessingState::LoadingModel).await;
        match self.summarizer.load().await {
            Ok(()) => {
                self.set_state(ProcessingState::Idle).await;
                Ok(())
            }
            Err(e) => {
                self.set_state(ProcessingState::Error).await;
                Err(e.into())
            }
        }
    }

    /// Process one document's extracted text end to end.
    ///
    /// Loads the model if needed, generates the summary, and updates the
    /// state machine and statistics. Fails on model-load failure and on
    /// empty input; everything else degrades inside the summarizer.
    pub async fn process_text(
        &self,
        text: &str,
        params: &SummaryParams,
        filename: &str,
    ) -> Result<SummaryResult, PipelineError> {
        if !self.summarizer.is_ready() {
            self.set_state(ProcessingState::LoadingModel).await;
            if let Err(e) = self.summarizer.load().await {
                self.set_state(ProcessingState::Error).await;
                self.stats.write().await.errors_encountered += 1;
                return Err(e.into());
            }
        }

        self.set_state(ProcessingState::Summarizing).await;
        match self.summarizer.summarize(text, params, filename).await {
            Ok(result) => {
                self.set_state(ProcessingState::Complete).await;
                self.stats
                    .write()
                    .await
                    .record_success(result.processing_time_secs);
                info!(
                    filename,
                    words = result.word_count,
                    confidence = result.confidence_score,
                    "document processed"
                );
                Ok(result)
            }
            Err(e) => {
                self.set_state(ProcessingState::Error).await;
                self.stats.write().await.errors_encountered += 1;
                Err(e.into())
            }
        }
    }

    /// Access the wrapped summarizer.
    pub fn summarizer(&self) -> &LegalSummarizer {
        &self.summarizer
    }
}
