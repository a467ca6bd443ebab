//! Shared test doubles.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use lexsum::{GenerationParams, ModelAdapter, ModelError};

/// Route crate log output to the test harness; respects `RUST_LOG`.
/// Safe to call from every test, only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Scriptable model adapter for pipeline tests.
///
/// Token counts are whitespace word counts, so tests control chunk
/// boundaries through sentence lengths. Generation pops scripted
/// responses first, then falls back to a fixed default.
pub struct MockAdapter {
    scripted: Mutex<VecDeque<Result<String, ModelError>>>,
    default_response: Result<String, ModelError>,
    generate_calls: AtomicUsize,
    ready: AtomicBool,
}

impl MockAdapter {
    /// Adapter whose every generation returns `reply`.
    pub fn succeeding(reply: &str) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            default_response: Ok(reply.to_string()),
            generate_calls: AtomicUsize::new(0),
            ready: AtomicBool::new(true),
        }
    }

    /// Adapter whose every generation fails with `error`.
    pub fn failing(error: ModelError) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            default_response: Err(error),
            generate_calls: AtomicUsize::new(0),
            ready: AtomicBool::new(true),
        }
    }

    /// Adapter that plays `responses` in order, then `default` forever.
    pub fn scripted(
        responses: Vec<Result<String, ModelError>>,
        default: Result<String, ModelError>,
    ) -> Self {
        Self {
            scripted: Mutex::new(responses.into()),
            default_response: default,
            generate_calls: AtomicUsize::new(0),
            ready: AtomicBool::new(true),
        }
    }

    /// Number of `generate` calls observed so far.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelAdapter for MockAdapter {
    async fn load(&self) -> Result<(), ModelError> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn token_count(&self, text: &str) -> Result<usize, ModelError> {
        Ok(text.split_whitespace().count())
    }

    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ModelError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.scripted.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => self.default_response.clone(),
        }
    }
}
