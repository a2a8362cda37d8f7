//! LLM collaborator used for scene extraction and sample repair.
//!
//! The pipeline only needs "prompt in, code out". [`LlmClient`] is that seam;
//! [`OpenAiClient`] talks to an OpenAI-compatible Responses endpoint and
//! tests substitute their own implementation.
//!
//! Token usage is returned with every completion. Callers that make many
//! calls keep their own [`TokenUsage`] total.

mod openai;
pub mod prompts;

use std::{ops::AddAssign, sync::Mutex};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::{LibraryFamily, SceneExtractor};

pub use openai::OpenAiClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API key not set. Export {0} or add it to .env")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no text output")]
    EmptyResponse,

    #[error("LLM unavailable: {0}")]
    Unavailable(String),
}

/// A text-completion backend.
pub trait LlmClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;
}

impl<T: LlmClient + ?Sized> LlmClient for &T {
    fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        (**self).complete(prompt)
    }
}

impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        (**self).complete(prompt)
    }
}

/// Client that fails every call, used when no backend could be configured.
#[derive(Debug, Clone)]
pub struct DisabledClient {
    reason: String,
}

impl DisabledClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl LlmClient for DisabledClient {
    fn complete(&self, _prompt: &str) -> Result<Completion, LlmError> {
        Err(LlmError::Unavailable(self.reason.clone()))
    }
}

/// Remove Markdown code fences the model wraps code in, then trim.
///
/// # Examples
///
/// ```
/// use scenesift::llm::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```python\nprint(1)\n```\n"), "print(1)");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```python", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Ask the model for a rewritten, fence-free source.
pub fn generate_code<C: LlmClient + ?Sized>(client: &C, prompt: &str) -> Result<(String, TokenUsage), LlmError> {
    let completion = client.complete(prompt)?;
    Ok((strip_code_fences(&completion.text), completion.usage))
}

/// [`SceneExtractor`] backed by an LLM.
///
/// Usage of all calls made through this extractor is summed and available
/// from [`LlmSceneExtractor::usage`].
pub struct LlmSceneExtractor<C> {
    client: C,
    usage: Mutex<TokenUsage>,
}

impl<C: LlmClient> LlmSceneExtractor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            usage: Mutex::new(TokenUsage::default()),
        }
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage.lock().map(|u| *u).unwrap_or_default()
    }
}

impl<C: LlmClient> SceneExtractor for LlmSceneExtractor<C> {
    fn extract(&self, source: &str, scene: &str) -> Result<String> {
        let prompt = prompts::extract_scene(LibraryFamily::Manim, scene, source);
        let (code, usage) = generate_code(&self.client, &prompt)?;
        if let Ok(mut total) = self.usage.lock() {
            *total += usage;
        }
        Ok(code)
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::testing::FakeClient;
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```python\nx = 1\n```"), "x = 1");
        assert_eq!(strip_code_fences("```\nx = 1\n```"), "x = 1");
        assert_eq!(strip_code_fences("  x = 1  \n"), "x = 1");
    }

    #[test]
    fn test_usage_accumulates() {
        let mut total = TokenUsage::default();
        total += TokenUsage {
            input_tokens: 1,
            output_tokens: 2,
            total_tokens: 3,
        };
        total += TokenUsage {
            input_tokens: 1,
            output_tokens: 2,
            total_tokens: 3,
        };
        assert_eq!(
            total,
            TokenUsage {
                input_tokens: 2,
                output_tokens: 4,
                total_tokens: 6,
            }
        );
    }

    #[test]
    fn test_scene_extractor_strips_fences_and_counts_tokens() {
        let client = FakeClient::new(|_| Ok("```python\nclass A(Scene): pass\n```".to_string()));
        let extractor = LlmSceneExtractor::new(&client);

        let code = extractor.extract("class A(Scene): pass\nclass B(Scene): pass", "A").unwrap();
        extractor.extract("class A(Scene): pass\nclass B(Scene): pass", "B").unwrap();

        assert_eq!(code, "class A(Scene): pass");
        assert_eq!(extractor.usage().total_tokens, 30);
        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("A scene"));
        assert!(prompts[1].contains("B scene"));
    }

    #[test]
    fn test_disabled_client_always_fails() {
        let client = DisabledClient::new("API key not set");
        let err = client.complete("anything").unwrap_err();
        assert_eq!(err.to_string(), "LLM unavailable: API key not set");
    }

    #[test]
    fn test_scene_extractor_propagates_errors() {
        let client = FakeClient::new(|_| Err(LlmError::EmptyResponse));
        let extractor = LlmSceneExtractor::new(&client);
        let err = extractor.extract("code", "A").unwrap_err();
        assert!(err.to_string().contains("no text output"));
        assert_eq!(extractor.usage(), TokenUsage::default());
    }
}
