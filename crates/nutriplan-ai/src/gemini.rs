//! Google Gemini backend with a model fallback chain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::fallback::first_success;
use crate::{GenerationRequest, ProviderError, TextProvider};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried in order until one answers.
pub const GEMINI_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-flash-latest",
    "gemini-2.0-flash",
];

const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

/// Google Gemini provider.
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    models: Vec<String>,
}

impl GeminiProvider {
    /// Create a provider using [`GEMINI_MODELS`].
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.into(),
            client,
            base_url: API_BASE_URL.to_owned(),
            models: GEMINI_MODELS.iter().map(|m| (*m).to_owned()).collect(),
        })
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the model chain.
    pub fn with_models(mut self, models: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Models in the order they are tried.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn generate_with_model(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![TextPart { text: prompt }],
            }],
        };

        tracing::debug!(model, "sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = serde_json::from_str::<GeminiResponse>(&text);

        if let Ok(GeminiResponse {
            error: Some(error), ..
        }) = &parsed
        {
            return Err(map_api_error(status, error));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited(text));
        }
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "gemini".to_owned(),
                message: format!("{status}: {text}"),
            });
        }

        let parsed = parsed.map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ProviderError::MalformedResponse("no candidate text".to_owned()))
    }
}

fn map_api_error(status: StatusCode, error: &GeminiError) -> ProviderError {
    let message = error
        .message
        .clone()
        .unwrap_or_else(|| format!("request failed with {status}"));

    let rate_limited = error.code == Some(429)
        || error.status.as_deref() == Some(RESOURCE_EXHAUSTED)
        || status == StatusCode::TOO_MANY_REQUESTS;

    if rate_limited {
        ProviderError::RateLimited(message)
    } else {
        ProviderError::Api {
            provider: "gemini".to_owned(),
            message,
        }
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        request.validate()?;

        let prompt = request.combined_prompt();
        let prompt = prompt.as_str();
        first_success(self.models.iter().map(String::as_str), |model| {
            self.generate_with_model(model, prompt)
        })
        .await
    }
}
