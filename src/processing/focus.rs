//! Focus-specific adjustments for summary generation.
//!
//! Every function here is total and side-effect free: a focus value maps
//! to a prompt prefix, generation parameter overrides, a keyword emphasis
//! transform applied before generation, and a labeling transform applied
//! after generation.

use regex::Regex;
use tracing::warn;

use crate::model::GenerationParams;
use crate::types::Focus;

/// Delimiter wrapped around emphasized keywords before generation.
///
/// Stripped again by [`post_process`]; it must never reach user-visible
/// output.
pub const EMPHASIS_MARKER: &str = "**";

/// Keywords emphasized for the obligations focus.
const OBLIGATION_KEYWORDS: &[&str] = &[
    "shall", "must", "required", "obligation", "duty", "responsible",
    "liable", "covenant", "undertake", "agree to", "commit to",
];

/// Keywords emphasized for the parties focus.
const PARTY_KEYWORDS: &[&str] = &[
    "party", "parties", "client", "contractor", "vendor", "supplier",
    "buyer", "seller", "lessor", "lessee", "licensor", "licensee",
    "plaintiff", "defendant", "company", "corporation", "individual",
];

/// Keywords emphasized for the dates focus.
const DATE_KEYWORDS: &[&str] = &[
    "date", "deadline", "due", "expire", "expires", "term", "period",
    "duration", "commence", "terminate", "effective", "within", "by",
    "before", "after",
];

/// Generation parameter overrides for a focus area, applied on top of the
/// length-derived base parameters.
pub fn apply_overrides(params: &mut GenerationParams, focus: Focus) {
    match focus {
        Focus::General => {
            params.length_penalty = 1.0;
            params.repetition_penalty = 1.1;
        }
        // Longer output enumerating each party's duties.
        Focus::Obligations => {
            params.length_penalty = 1.2;
            params.repetition_penalty = 1.0;
            params.no_repeat_ngram_size = Some(2);
        }
        // Shorter, tighter output naming the parties.
        Focus::Parties => {
            params.length_penalty = 0.8;
            params.repetition_penalty = 1.2;
            params.no_repeat_ngram_size = Some(3);
        }
        Focus::Dates => {
            params.length_penalty = 0.9;
            params.repetition_penalty = 1.1;
            params.no_repeat_ngram_size = Some(2);
        }
    }
}

/// Natural-language instruction prepended to chunk text before generation.
pub fn prompt_prefix(focus: Focus) -> &'static str {
    match focus {
        Focus::General => {
            "Summarize the following legal document, highlighting the main points and key information:"
        }
        Focus::Obligations => {
            "Summarize the following legal document, focusing specifically on obligations, duties, responsibilities, and requirements of each party:"
        }
        Focus::Parties => {
            "Summarize the following legal document, focusing specifically on the parties involved, their roles, and relationships:"
        }
        Focus::Dates => {
            "Summarize the following legal document, focusing specifically on important dates, deadlines, time periods, and temporal requirements:"
        }
    }
}

fn keywords(focus: Focus) -> &'static [&'static str] {
    match focus {
        Focus::General => &[],
        Focus::Obligations => OBLIGATION_KEYWORDS,
        Focus::Parties => PARTY_KEYWORDS,
        Focus::Dates => DATE_KEYWORDS,
    }
}

/// Wraps whole-word keyword matches in emphasis markers, preserving the
/// original casing. Identity transform for the general focus.
///
/// Matching is case-insensitive and word-bounded, so "party" never matches
/// inside "counterparty".
pub fn emphasize(text: &str, focus: Focus) -> String {
    let words = keywords(focus);
    if words.is_empty() {
        return text.to_string();
    }

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = match Regex::new(&format!(r"(?i)\b({alternation})\b")) {
        Ok(re) => re,
        Err(e) => {
            // Keyword lists are static, so this cannot happen; emphasis is
            // an enhancement, not a requirement.
            warn!(error = %e, "keyword pattern failed to compile, skipping emphasis");
            return text.to_string();
        }
    };

    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("{EMPHASIS_MARKER}{}{EMPHASIS_MARKER}", &caps[0])
        })
        .into_owned()
}

/// Strips emphasis markers and, for non-general focuses, prepends a label
/// when the summary actually surfaced the requested focus.
///
/// The label guard prevents tagging a summary as "Key Obligations" when
/// the model produced nothing obligation-related.
pub fn post_process(summary: &str, focus: Focus) -> String {
    let cleaned = strip_emphasis(summary);
    let lower = cleaned.to_lowercase();

    let label = match focus {
        Focus::General => None,
        Focus::Obligations => {
            (lower.contains("obligation") || lower.contains("shall")).then_some("Key Obligations: ")
        }
        Focus::Parties => ["party", "parties", "client", "contractor"]
            .iter()
            .any(|w| lower.contains(w))
            .then_some("Parties Involved: "),
        Focus::Dates => ["date", "deadline", "due", "term"]
            .iter()
            .any(|w| lower.contains(w))
            .then_some("Important Dates: "),
    };

    match label {
        Some(label) => format!("{label}{cleaned}"),
        None => cleaned,
    }
}

/// Removes every emphasis span inserted by [`emphasize`].
fn strip_emphasis(text: &str) -> String {
    // Static pattern, compile cannot fail.
    match Regex::new(r"\*\*(.*?)\*\*") {
        Ok(re) => re.replace_all(text, "$1").into_owned(),
        Err(_) => text.replace(EMPHASIS_MARKER, ""),
    }
}
