//! Core value types for legal document summarization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod error;

// Re-exports
pub use error::{Error, Result};

/// Lower bound for the summary word limit.
pub const MIN_SUMMARY_WORDS: usize = 50;

/// Upper bound for the summary word limit.
pub const MAX_SUMMARY_WORDS: usize = 1000;

/// Default summary word limit.
pub const DEFAULT_SUMMARY_WORDS: usize = 300;

/// Summary length preference controlling the generation token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    /// Short summary (50-100 words)
    Brief,
    /// Standard summary (100-200 words)
    Standard,
    /// Detailed summary (200-400 words)
    Detailed,
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self::Standard
    }
}

impl SummaryLength {
    /// Number of leading sentences an extractive fallback summary keeps.
    pub fn sentence_budget(&self) -> usize {
        match self {
            Self::Brief => 2,
            Self::Standard => 4,
            Self::Detailed => 6,
        }
    }
}

/// Focus area steering prompting, generation parameters, and labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    /// General overview of the document
    General,
    /// Focus on duties, responsibilities, and requirements
    Obligations,
    /// Focus on parties involved and their roles
    Parties,
    /// Focus on important dates, deadlines, and time periods
    Dates,
}

impl Default for Focus {
    fn default() -> Self {
        Self::General
    }
}

/// Caller-supplied summary parameters, exactly as received.
///
/// Values are free-form strings so that a UI layer can pass user input
/// through unmodified; unknown values are coerced to defaults during
/// validation rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryParams {
    /// Requested summary length ("brief", "standard", "detailed")
    pub length: String,

    /// Requested focus area ("general", "obligations", "parties", "dates")
    pub focus: String,

    /// Maximum number of words in the summary
    pub max_words: usize,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            length: "standard".to_string(),
            focus: "general".to_string(),
            max_words: DEFAULT_SUMMARY_WORDS,
        }
    }
}

/// Sanitized summary parameters.
///
/// Produced from [`SummaryParams`] by
/// [`validate_params`](crate::processing::validate_params); all fields are
/// guaranteed in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedParams {
    /// Summary length preference
    pub length: SummaryLength,

    /// Summary focus area
    pub focus: Focus,

    /// Word limit, clamped to [`MIN_SUMMARY_WORDS`]..=[`MAX_SUMMARY_WORDS`]
    pub max_words: usize,
}

impl Default for ValidatedParams {
    fn default() -> Self {
        Self {
            length: SummaryLength::default(),
            focus: Focus::default(),
            max_words: DEFAULT_SUMMARY_WORDS,
        }
    }
}

/// Result of summarizing one document.
///
/// Created once at the end of the pipeline and never mutated. The core
/// does not persist results; storage, if any, is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Name of the original document
    pub original_filename: String,

    /// The generated summary text
    pub summary_text: String,

    /// Wall-clock time spent in the pipeline, in seconds
    pub processing_time_secs: f64,

    /// Number of whitespace-separated words in `summary_text`
    pub word_count: usize,

    /// Heuristic quality signal in [0, 1]; lower values indicate that
    /// fallback tiers were needed during generation
    pub confidence_score: f32,

    /// When the summary was generated
    pub generated_at: DateTime<Utc>,
}

/// Word limit bounds exposed to UI layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WordLimits {
    /// Smallest accepted word limit
    pub min: usize,
    /// Largest accepted word limit
    pub max: usize,
    /// Default word limit
    pub default: usize,
}

/// Available customization options for rendering a settings UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationOptions {
    /// Valid length values mapped to human-readable descriptions
    pub lengths: HashMap<String, String>,

    /// Valid focus values mapped to human-readable descriptions
    pub focuses: HashMap<String, String>,

    /// Accepted word limit range
    pub word_limits: WordLimits,
}

/// Describes the valid summary customization values.
pub fn customization_options() -> CustomizationOptions {
    let lengths = [
        ("brief", "Short summary (50-100 words)"),
        ("standard", "Standard summary (100-200 words)"),
        ("detailed", "Detailed summary (200-400 words)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let focuses = [
        ("general", "General overview of the document"),
        ("obligations", "Focus on duties, responsibilities, and requirements"),
        ("parties", "Focus on parties involved and their roles"),
        ("dates", "Focus on important dates, deadlines, and time periods"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    CustomizationOptions {
        lengths,
        focuses,
        word_limits: WordLimits {
            min: MIN_SUMMARY_WORDS,
            max: MAX_SUMMARY_WORDS,
            default: DEFAULT_SUMMARY_WORDS,
        },
    }
}
