use crate::config::NarrativeConfig;
use crate::model::NarrativeError;
use crate::narrative::prompts::SYSTEM_INSTRUCTION;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// One prompt in, the model's raw text answer out.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, NarrativeError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions client (OpenAI wire format) with bearer auth.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(cfg: &NarrativeConfig, api_key: String) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .connect_timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| NarrativeError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_key,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        })
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, NarrativeError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: SYSTEM_INSTRUCTION },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest)?;
        if !status.is_success() {
            warn!("❌ Narrative endpoint responded [{}]", status);
            debug!("Narrative error body: {}", body);
            return Err(NarrativeError::Status(status.as_u16()));
        }

        extract_content(&body)
    }
}

fn map_reqwest(e: reqwest::Error) -> NarrativeError {
    if e.is_timeout() {
        NarrativeError::Timeout
    } else {
        NarrativeError::Http(e.to_string())
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions body and
/// strips code fences around it.
pub fn extract_content(body: &str) -> Result<String, NarrativeError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| NarrativeError::MalformedResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| NarrativeError::Schema("missing choices[0].message.content".into()))?;

    Ok(strip_code_fences(&content))
}

pub fn strip_code_fences(content: &str) -> String {
    content.trim().replace("```json", "").replace("```", "").trim().to_string()
}
