//! AI text providers for nutriplan.
//!
//! A provider turns free-form client data into diet plan text in the
//! keyword format the plan reader understands. The backend is picked from
//! the API key prefix:
//!
//! | Prefix  | Backend    |
//! |---------|------------|
//! | `sk-`   | OpenAI     |
//! | `pplx-` | Perplexity |
//! | other   | Gemini     |
//!
//! Gemini walks a list of models and stops at the first answer. A rate
//! limit ends the walk early.
//!
//! ```no_run
//! # async fn run() -> Result<(), nutriplan_ai::ProviderError> {
//! use nutriplan_ai::{DEFAULT_SYSTEM_PROMPT, GenerationRequest, ProviderConfig, provider_for};
//!
//! let provider = provider_for(&ProviderConfig::new("sk-..."))?;
//! let request = GenerationRequest::new(DEFAULT_SYSTEM_PROMPT, "male, 32, 84kg, cutting");
//! let plan_text = provider.generate(&request).await?;
//! # let _ = plan_text;
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
pub mod fallback;
pub mod gemini;
pub mod openai_compatible;
pub mod prompts;
mod provider;

pub use credentials::{CredentialStore, mask_key};
pub use error::ProviderError;
pub use gemini::{GEMINI_MODELS, GeminiProvider};
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use prompts::DEFAULT_SYSTEM_PROMPT;
pub use provider::{
    CLIENT_DATA_HEADER, GenerationRequest, ProviderConfig, ProviderKind, TextProvider,
    provider_for,
};
