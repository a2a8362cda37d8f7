use std::{env, thread, time::Duration};

use reqwest::{
    StatusCode,
    blocking::{Client, Response},
};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{Completion, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const MAX_RETRY_DELAY_MS: u64 = 10_000;

/// Blocking client for an OpenAI-compatible `/responses` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAiClient {
    /// Build a client, reading the key from `OPENAI_API_KEY`.
    pub fn from_env(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(API_KEY_VAR.to_string()))?;
        Self::new(config, api_key)
    }

    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key,
            config: config.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.config.base_url.trim_end_matches('/'))
    }

    fn send(&self, body: &Value) -> Result<Response, LlmError> {
        Ok(self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?)
    }

    /// POST with exponential backoff on 429 and 5xx.
    fn post_with_retry(&self, body: &Value) -> Result<Value, LlmError> {
        let mut attempt = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            let response = self.send(body)?;
            let status = response.status();
            if status.is_success() {
                return Ok(response.json()?);
            }

            let text = response.text().unwrap_or_default();
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < self.config.max_retries {
                attempt += 1;
                warn!(
                    "API request failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt, self.config.max_retries, delay, status
                );
                thread::sleep(delay);
                delay = Duration::from_millis((delay.as_millis() as u64 * 2).min(MAX_RETRY_DELAY_MS));
                continue;
            }

            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
    }
}

impl LlmClient for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "input": [{ "role": "user", "content": prompt }],
        });
        debug!("requesting completion from {} ({} chars)", self.config.model, prompt.len());

        let response = self.post_with_retry(&body)?;
        let text = output_text(&response).ok_or(LlmError::EmptyResponse)?;
        Ok(Completion {
            text,
            usage: usage(&response),
        })
    }
}

/// Concatenated `output_text` parts of all message items.
fn output_text(response: &Value) -> Option<String> {
    let parts: Vec<&str> = response
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

fn usage(response: &Value) -> TokenUsage {
    let field = |name: &str| {
        response
            .pointer(&format!("/usage/{}", name))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    TokenUsage {
        input_tokens: field("input_tokens"),
        output_tokens: field("output_tokens"),
        total_tokens: field("total_tokens"),
    }
}
