mod common;

use std::sync::Arc;

use common::MockAdapter;
use lexsum::{
    LegalSummarizer, ModelError, SummarizeError, SummarizerConfig, SummaryParams, EXTRACTIVE_TAG,
};

fn params(length: &str, focus: &str, max_words: usize) -> SummaryParams {
    SummaryParams {
        length: length.to_string(),
        focus: focus.to_string(),
        max_words,
    }
}

/// Four sentences, seven words each; 28 tokens under the word-count
/// tokenizer of [`MockAdapter`].
const CONTRACT_TEXT: &str = "The client shall pay the contractor monthly. \
    The contractor must deliver reports every quarter. \
    Either party may terminate with written notice. \
    The agreement remains effective for two years";

#[tokio::test]
async fn empty_input_is_the_only_hard_failure() {
    let adapter = Arc::new(MockAdapter::succeeding("a summary"));
    let summarizer = LegalSummarizer::new(adapter);

    let result = summarizer.summarize("", &SummaryParams::default(), "f.txt").await;
    assert!(matches!(result, Err(SummarizeError::EmptyInput)));

    let result = summarizer
        .summarize("   \n\t  ", &SummaryParams::default(), "f.txt")
        .await;
    assert!(matches!(result, Err(SummarizeError::EmptyInput)));
}

#[tokio::test]
async fn clean_run_has_full_confidence() {
    let adapter = Arc::new(MockAdapter::succeeding(
        "The parties shall meet their obligations under the agreement.",
    ));
    let summarizer = LegalSummarizer::new(adapter.clone());

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("standard", "obligations", 300), "contract.pdf")
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 1.0);
    assert_eq!(result.original_filename, "contract.pdf");
    assert_eq!(
        result.word_count,
        result.summary_text.split_whitespace().count()
    );
    // Single chunk, single model call, no merge needed.
    assert_eq!(adapter.generate_calls(), 1);
    // The summary surfaced obligations, so the label applies.
    assert!(result.summary_text.starts_with("Key Obligations: "));
}

#[tokio::test]
async fn always_failing_model_yields_tagged_extractive_summary() {
    let adapter = Arc::new(MockAdapter::failing(ModelError::ServiceUnavailable(
        "connection refused".to_string(),
    )));
    let summarizer = LegalSummarizer::new(adapter);

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("brief", "general", 300), "f.pdf")
        .await
        .unwrap();

    assert!(result.summary_text.starts_with(EXTRACTIVE_TAG));
    assert_eq!(result.confidence_score, 0.3);
    // Brief keeps the first two sentences of the raw text.
    assert!(result.summary_text.contains("The client shall pay"));
    assert!(!result.summary_text.contains("effective for two years"));
}

#[tokio::test]
async fn partial_degradation_depresses_confidence() {
    // Two chunks. Chunk one fails its focused call, succeeds on the
    // conservative retry; chunk two succeeds directly; merge succeeds.
    let adapter = Arc::new(MockAdapter::scripted(
        vec![
            Err(ModelError::OutOfMemory("beam search OOM".to_string())),
            Ok("first chunk summary".to_string()),
            Ok("second chunk summary".to_string()),
            Ok("the merged summary of the document".to_string()),
        ],
        Ok("unexpected extra call".to_string()),
    ));
    let summarizer = LegalSummarizer::with_config(
        adapter.clone(),
        SummarizerConfig {
            max_chunk_tokens: 16,
        },
    );

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("standard", "general", 300), "f.txt")
        .await
        .unwrap();

    // One of two chunks degraded: 0.5 * 0.8.
    assert_eq!(result.confidence_score, 0.4);
    assert_eq!(result.summary_text, "the merged summary of the document");
    assert_eq!(adapter.generate_calls(), 4);
}

#[tokio::test]
async fn fatal_chunk_error_skips_the_retry_tier() {
    // Chunk one fails non-retryably and goes straight to extractive
    // sentences; chunk two succeeds, so the run stays generative.
    let adapter = Arc::new(MockAdapter::scripted(
        vec![
            Err(ModelError::NotLoaded),
            Ok("second chunk summary".to_string()),
            Ok("merged text".to_string()),
        ],
        Ok("unexpected extra call".to_string()),
    ));
    // A budget of 18 still splits the 28-token text into two chunks but
    // keeps the merge concatenation within the direct-merge branch.
    let summarizer = LegalSummarizer::with_config(
        adapter.clone(),
        SummarizerConfig {
            max_chunk_tokens: 18,
        },
    );

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("standard", "general", 300), "f.txt")
        .await
        .unwrap();

    // No conservative retry happened for the fatal error: three calls
    // total instead of four.
    assert_eq!(adapter.generate_calls(), 3);
    assert_eq!(result.confidence_score, 0.4);
}

#[tokio::test]
async fn word_cap_truncates_with_ellipsis() {
    let long_reply = (0..200)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    let adapter = Arc::new(MockAdapter::succeeding(&long_reply));
    let summarizer = LegalSummarizer::new(adapter);

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("detailed", "general", 60), "f.txt")
        .await
        .unwrap();

    assert_eq!(result.word_count, 60);
    assert!(result.summary_text.ends_with("..."));
    assert_eq!(
        result.word_count,
        result.summary_text.split_whitespace().count()
    );
}

#[tokio::test]
async fn merge_of_one_summary_makes_no_model_call() {
    let adapter = Arc::new(MockAdapter::succeeding("unused"));
    let summarizer = LegalSummarizer::new(adapter.clone());

    let (merged, degraded) = summarizer
        .merge_summaries(&["a summary".to_string()])
        .await;
    assert_eq!(merged, "a summary");
    assert!(!degraded);
    assert_eq!(adapter.generate_calls(), 0);

    let (merged, degraded) = summarizer.merge_summaries(&[]).await;
    assert_eq!(merged, "");
    assert!(!degraded);
    assert_eq!(adapter.generate_calls(), 0);
}

#[tokio::test]
async fn merge_failure_degrades_to_concatenation() {
    // Both chunks summarize, then the merge call fails.
    let adapter = Arc::new(MockAdapter::scripted(
        vec![
            Ok("first part".to_string()),
            Ok("second part".to_string()),
            Err(ModelError::Generation("decoder fault".to_string())),
            Err(ModelError::Generation("decoder fault".to_string())),
        ],
        Ok("unexpected extra call".to_string()),
    ));
    let summarizer = LegalSummarizer::with_config(
        adapter.clone(),
        SummarizerConfig {
            max_chunk_tokens: 16,
        },
    );

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("standard", "general", 300), "f.txt")
        .await
        .unwrap();

    assert_eq!(result.summary_text, "first part second part");
    // Chunks were clean but the merge degraded: 1.0 * 0.8.
    assert_eq!(result.confidence_score, 0.8);
}

#[tokio::test]
async fn oversized_merge_concatenation_is_rechunked() {
    // Chunk summaries are long enough that their concatenation exceeds
    // the context budget, forcing the recursive merge pass at half
    // budget: four sub-chunks, each summarized independently.
    let adapter = Arc::new(MockAdapter::scripted(
        vec![
            Ok("alpha one two three four. bravo one two three four.".to_string()),
            Ok("charlie one two three four. delta one two three four.".to_string()),
        ],
        Ok("part".to_string()),
    ));
    let summarizer = LegalSummarizer::with_config(
        adapter.clone(),
        SummarizerConfig {
            max_chunk_tokens: 16,
        },
    );

    let result = summarizer
        .summarize(CONTRACT_TEXT, &params("standard", "general", 300), "f.txt")
        .await
        .unwrap();

    assert_eq!(result.summary_text, "part part part part");
    assert_eq!(result.confidence_score, 1.0);
    // Two chunk calls plus four sub-chunk merge calls.
    assert_eq!(adapter.generate_calls(), 6);
}

#[tokio::test]
async fn invalid_parameters_are_coerced_not_rejected() {
    let adapter = Arc::new(MockAdapter::succeeding("a plain summary of the document"));
    let summarizer = LegalSummarizer::new(adapter);

    let result = summarizer
        .summarize(
            CONTRACT_TEXT,
            &params("enormous", "everything", 3),
            "f.txt",
        )
        .await
        .unwrap();

    // Unknown focus coerced to general: no label applied.
    assert_eq!(result.summary_text, "a plain summary of the document");
    // max_words clamped to 50, which the six-word summary is under.
    assert_eq!(result.word_count, 6);
}
