//! Provider selection and the provider trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::gemini::GeminiProvider;
use crate::openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::ProviderError;

/// Header put in front of the client data.
pub const CLIENT_DATA_HEADER: &str = "🚀 CLIENT DATA:\n";

/// Which backend a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Perplexity,
    Gemini,
}

impl ProviderKind {
    /// Pick the backend from the credential prefix: `sk-` is OpenAI,
    /// `pplx-` is Perplexity, anything else is Gemini.
    pub fn detect(api_key: &str) -> Self {
        let key = api_key.trim();
        if key.starts_with("sk-") {
            ProviderKind::OpenAi
        } else if key.starts_with("pplx-") {
            ProviderKind::Perplexity
        } else {
            ProviderKind::Gemini
        }
    }

    /// Short name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to draft a diet plan from client data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub client_data: String,
}

impl GenerationRequest {
    /// Create a request.
    pub fn new(system_prompt: impl Into<String>, client_data: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            client_data: client_data.into(),
        }
    }

    /// User message for chat backends.
    pub fn user_message(&self) -> String {
        format!("{CLIENT_DATA_HEADER}{}", self.client_data)
    }

    /// Single prompt for backends without a system role.
    pub fn combined_prompt(&self) -> String {
        format!("{}\n\n{}", self.system_prompt, self.user_message())
    }

    /// Reject requests with no client data.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.client_data.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        Ok(())
    }
}

/// A backend that turns a [`GenerationRequest`] into diet plan text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Backend name for logs and errors.
    fn name(&self) -> &str;

    /// Generate plan text. The result is passed to the parser unchanged.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// Settings for [`provider_for`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Override the backend's base URL.
    pub base_url: Option<String>,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a config for a credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Build the provider a credential selects.
pub fn provider_for(config: &ProviderConfig) -> Result<Box<dyn TextProvider>, ProviderError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(ProviderError::MissingCredential);
    }

    let kind = ProviderKind::detect(api_key);
    tracing::debug!(provider = %kind, "selected provider");

    let provider: Box<dyn TextProvider> = match kind {
        ProviderKind::OpenAi | ProviderKind::Perplexity => {
            let mut settings = if kind == ProviderKind::OpenAi {
                OpenAiCompatibleConfig::openai(api_key)
            } else {
                OpenAiCompatibleConfig::perplexity(api_key)
            };
            if let Some(url) = &config.base_url {
                settings.base_url = url.clone();
            }
            Box::new(OpenAiCompatibleProvider::new(settings, config.request_timeout)?)
        }
        ProviderKind::Gemini => {
            let mut provider = GeminiProvider::new(api_key, config.request_timeout)?;
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url.clone());
            }
            Box::new(provider)
        }
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect() {
        assert_eq!(ProviderKind::detect("sk-abc"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::detect("  sk-proj-1"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::detect("pplx-123"), ProviderKind::Perplexity);
        assert_eq!(ProviderKind::detect("AIzaSy123"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::detect("SK-upper"), ProviderKind::Gemini);
    }

    #[test]
    fn test_messages() {
        let request = GenerationRequest::new("SYSTEM", "male, 80kg");
        assert_eq!(request.user_message(), "🚀 CLIENT DATA:\nmale, 80kg");
        assert_eq!(
            request.combined_prompt(),
            "SYSTEM\n\n🚀 CLIENT DATA:\nmale, 80kg"
        );
    }

    #[test]
    fn test_validate() {
        assert!(GenerationRequest::new("s", "data").validate().is_ok());
        assert!(matches!(
            GenerationRequest::new("s", " \n").validate(),
            Err(ProviderError::EmptyInput)
        ));
    }

    #[test]
    fn test_provider_for() {
        let openai = provider_for(&ProviderConfig::new("sk-1")).unwrap();
        assert_eq!(openai.name(), "openai");
        let pplx = provider_for(&ProviderConfig::new("pplx-1")).unwrap();
        assert_eq!(pplx.name(), "perplexity");
        let gemini = provider_for(&ProviderConfig::new("AIza")).unwrap();
        assert_eq!(gemini.name(), "gemini");
        assert!(matches!(
            provider_for(&ProviderConfig::new("  ")),
            Err(ProviderError::MissingCredential)
        ));
    }
}
