/// Error from a text provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("client data is empty")]
    EmptyInput,
    /// Quota exhausted. Trying another model will not help.
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("{provider} API error: {message}")]
    Api { provider: String, message: String },
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("no candidates to try")]
    NoCandidates,
    #[error("all candidates failed, last error: {0}")]
    AllCandidatesFailed(Box<ProviderError>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Whether the next candidate in a fallback chain should be tried.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ProviderError::RateLimited(_)
                | ProviderError::MissingCredential
                | ProviderError::EmptyInput
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e.to_string())
    }
}
