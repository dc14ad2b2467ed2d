use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clients::traits::{AnswerModel, LlmError};
use crate::config::Config;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

fn is_placeholder(key: &str) -> bool {
    let t = key.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}

impl GeminiClient {
    /// No request timeout is set: a slow endpoint holds the calling request.
    pub fn new(api_key: String, model: String, api_base: String) -> Result<Self, LlmError> {
        if is_placeholder(&api_key) {
            return Err(LlmError::NotConfigured(
                "GEMINI_API_KEY is missing or a placeholder".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("quick-answer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let key = config.runtime.gemini_api_key.clone().unwrap_or_default();
        Self::new(key, config.llm.model.clone(), config.llm.api_base.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

/// Concatenate the visible text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked: {}", r))
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(LlmError::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!("finish reason: {}", r))
            .unwrap_or_else(|| "empty content".to_string());
        return Err(LlmError::EmptyResponse(reason));
    }
    Ok(text)
}

/// Prefer the API's own error message; fall back to the raw body.
fn api_error(status: reqwest::StatusCode, body: &str) -> LlmError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => match (env.error.status, env.error.message) {
            (Some(s), Some(m)) => format!("{}. {}", s, m),
            (None, Some(m)) => m,
            (Some(s), None) => s,
            (None, None) => body.to_string(),
        },
        Err(_) => body.to_string(),
    };
    LlmError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl AnswerModel for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!(
            "Calling Gemini generateContent (model={}, chars={})",
            self.model,
            user_message.len()
        );

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: user_message }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Parse(e.to_string()))?;
        extract_text(parsed)
    }
}
