use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tiktoken_rs::{cl100k_base, CoreBPE};
use tracing::{debug, info};

use super::{GenerationParams, ModelAdapter, ModelError};

/// Configuration for the Ollama-style HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the inference service
    pub api_base: String,
    /// Model identifier to request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:11434".to_string(),
            model: "legal-bart".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Generation response returned by the service.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// The generated text
    response: String,

    /// Number of tokens in the response
    #[allow(dead_code)]
    eval_count: Option<usize>,

    /// Error message if any
    error: Option<String>,
}

/// Translate a service error string into a typed [`ModelError`] kind.
///
/// This is the one place textual inspection is allowed; everything above
/// the adapter routes on the variant.
fn map_service_error(error: &str) -> ModelError {
    let lower = error.to_lowercase();
    if lower.contains("out of memory") || lower.contains("oom") || lower.contains("memory") {
        ModelError::OutOfMemory(error.to_string())
    } else if lower.contains("unavailable") || lower.contains("loading") || lower.contains("try again") {
        ModelError::ServiceUnavailable(error.to_string())
    } else if lower.contains("not found") || lower.contains("failed to load") {
        ModelError::LoadFailed(error.to_string())
    } else {
        ModelError::Generation(error.to_string())
    }
}

/// Model adapter backed by an Ollama-style HTTP inference endpoint.
///
/// Token counting uses a local cl100k tokenizer so the chunker never needs
/// a network round-trip per sentence.
pub struct OllamaAdapter {
    config: OllamaConfig,
    client: Client,
    bpe: CoreBPE,
    ready: AtomicBool,
}

impl OllamaAdapter {
    /// Create a new adapter. Does not contact the service; call
    /// [`load`](ModelAdapter::load) before generating.
    pub fn new(config: OllamaConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?;
        let bpe = cl100k_base().map_err(|e| ModelError::Tokenization(e.to_string()))?;

        Ok(Self {
            config,
            client,
            bpe,
            ready: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl ModelAdapter for OllamaAdapter {
    async fn load(&self) -> Result<(), ModelError> {
        if self.ready.load(Ordering::Acquire) {
            return Ok(());
        }

        // Health check doubles as a weight warm-up on the service side.
        let url = format!("{}/api/tags", self.config.api_base);
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                ModelError::ServiceUnavailable(e.to_string())
            } else {
                ModelError::LoadFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(ModelError::LoadFailed(error));
        }

        self.ready.store(true, Ordering::Release);
        info!(model = %self.config.model, "model service ready");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn token_count(&self, text: &str) -> Result<usize, ModelError> {
        Ok(self.bpe.encode_with_special_tokens(text).len())
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ModelError> {
        if !self.is_ready() {
            return Err(ModelError::NotLoaded);
        }

        let url = format!("{}/api/generate", self.config.api_base);

        let mut options = json!({
            "num_predict": params.max_new_tokens,
            "min_new_tokens": params.min_new_tokens,
            "num_beams": params.num_beams,
            "length_penalty": params.length_penalty,
            "repeat_penalty": params.repetition_penalty,
            "early_stopping": params.early_stopping,
        });
        if let Some(ngram) = params.no_repeat_ngram_size {
            options["no_repeat_ngram_size"] = json!(ngram);
        }

        let request_body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": options,
        });

        debug!(prompt_len = prompt.len(), "requesting generation");

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ModelError::ServiceUnavailable(e.to_string())
                } else {
                    ModelError::Generation(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(map_service_error(&error));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Generation(format!("invalid response: {e}")))?;

        if let Some(error) = generate_response.error {
            return Err(map_service_error(&error));
        }

        Ok(generate_response.response)
    }
}
