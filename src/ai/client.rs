use super::AiError;
use crate::config::Config;
use crate::pipeline::CompletionRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Token accounting reported by the API
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// One configured endpoint. Cheap to clone.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AiClient {
    pub fn new(config: &Config) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Request body for a pipeline submission
    pub fn chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                Message {
                    role: "user".to_string(),
                    content: request.user_message(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Send one request and return the first choice's text. No retries.
    pub async fn complete(
        &self,
        api_key: Option<&str>,
        request: &CompletionRequest,
    ) -> Result<String, AiError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AiError::MissingApiKey)?;
        let body = self.chat_request(request);

        debug!(endpoint = %self.endpoint, model = %self.model, "sending completion request");
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(AiError::Status {
                status: status.as_u16(),
                body: crate::util::truncate(&text, 200),
            });
        }

        let (content, usage) = parse_completion(&text)?;
        if let Some(usage) = usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "completion usage"
            );
        }
        Ok(content)
    }
}

/// Pull the first choice's text out of a response body
pub fn parse_completion(text: &str) -> Result<(String, Option<Usage>), AiError> {
    let parsed: ChatResponse = serde_json::from_str(text)?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(AiError::EmptyCompletion)?;
    Ok((content, parsed.usage))
}
