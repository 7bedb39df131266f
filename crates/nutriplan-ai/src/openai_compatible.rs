//! Chat-completions backends: OpenAI and Perplexity.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{GenerationRequest, ProviderError, TextProvider};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const OPENAI_TEMPERATURE: f32 = 0.3;

const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";
const PERPLEXITY_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Endpoint, model and sampling for one chat-completions backend.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    /// Name for logs and errors.
    pub provider_name: String,
}

impl OpenAiCompatibleConfig {
    /// OpenAI with `gpt-4o-mini`.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_owned(),
            api_key: api_key.into(),
            model: OPENAI_MODEL.to_owned(),
            temperature: OPENAI_TEMPERATURE,
            provider_name: "openai".to_owned(),
        }
    }

    /// Perplexity with its large online model.
    pub fn perplexity(api_key: impl Into<String>) -> Self {
        Self {
            base_url: PERPLEXITY_BASE_URL.to_owned(),
            api_key: api_key.into(),
            model: PERPLEXITY_MODEL.to_owned(),
            temperature: PERPLEXITY_TEMPERATURE,
            provider_name: "perplexity".to_owned(),
        }
    }
}

/// Provider for any endpoint speaking the OpenAI chat-completions API.
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider.
    pub fn new(config: OpenAiCompatibleConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn api_error(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::Api {
            provider: self.config.provider_name.clone(),
            message: message.into(),
        }
    }

    fn map_api_error(&self, status: StatusCode, body: &str) -> ProviderError {
        let message = serde_json::from_str::<ChatResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("{status}: {body}"));

        if status == StatusCode::TOO_MANY_REQUESTS {
            ProviderError::RateLimited(message)
        } else {
            self.api_error(message)
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        request.validate()?;

        let user = request.user_message();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.config.temperature,
        };

        tracing::debug!(
            provider = %self.config.provider_name,
            model = %self.config.model,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(self.map_api_error(status, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(self.api_error(error.message.unwrap_or_else(|| "unknown error".to_owned())));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("no message content".to_owned()))
    }
}
