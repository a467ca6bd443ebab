use tracing::warn;

use crate::types::{
    Focus, SummaryLength, SummaryParams, ValidatedParams, MAX_SUMMARY_WORDS, MIN_SUMMARY_WORDS,
};

/// Sanitizes caller-supplied summary parameters.
///
/// Unknown length or focus values are coerced to their defaults and the
/// word limit is clamped into range; invalid input is never rejected.
/// This is a deliberate sanitize-don't-fail policy for a user-facing
/// tool — the only hard input failure is empty document text, which is
/// checked by the summarizer itself.
pub fn validate_params(params: &SummaryParams) -> ValidatedParams {
    let length = match params.length.as_str() {
        "brief" => SummaryLength::Brief,
        "standard" => SummaryLength::Standard,
        "detailed" => SummaryLength::Detailed,
        other => {
            warn!(length = other, "invalid summary length, using standard");
            SummaryLength::Standard
        }
    };

    let focus = match params.focus.as_str() {
        "general" => Focus::General,
        "obligations" => Focus::Obligations,
        "parties" => Focus::Parties,
        "dates" => Focus::Dates,
        other => {
            warn!(focus = other, "invalid summary focus, using general");
            Focus::General
        }
    };

    let max_words = params.max_words.clamp(MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS);
    if max_words != params.max_words {
        warn!(
            requested = params.max_words,
            clamped = max_words,
            "word limit out of range"
        );
    }

    ValidatedParams {
        length,
        focus,
        max_words,
    }
}
