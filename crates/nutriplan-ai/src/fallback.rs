//! Ordered fallback over candidates.

use std::fmt::Display;
use std::future::Future;

use crate::ProviderError;

/// Try `attempt` on each candidate in order and return the first success.
///
/// A non-retryable error (see [`ProviderError::is_retryable`]) is returned
/// at once. When every candidate fails, the last error is returned wrapped
/// in [`ProviderError::AllCandidatesFailed`].
pub async fn first_success<C, T, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<T, ProviderError>
where
    C: Display,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_error = None;

    for candidate in candidates {
        let label = candidate.to_string();
        match attempt(candidate).await {
            Ok(value) => {
                tracing::debug!(candidate = %label, "candidate succeeded");
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                tracing::warn!(candidate = %label, error = %e, "candidate failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(ProviderError::AllCandidatesFailed(Box::new(e))),
        None => Err(ProviderError::NoCandidates),
    }
}
