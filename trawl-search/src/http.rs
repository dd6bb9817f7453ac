//! Shared HTTP client with User-Agent rotation for provider requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers and
//! rotating User-Agent strings, plus a helper that turns a request into a
//! response body with provider-attributed errors.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] configured for provider API requests.
///
/// The client has:
/// - Cookie store enabled
/// - Timeout from config
/// - Random User-Agent from built-in rotation list (or custom if configured)
/// - Brotli and gzip decompression (Stack Exchange always compresses)
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Send `request` and return the body of a successful response.
///
/// # Errors
///
/// Returns [`SearchError::Http`] on transport failure, non-2xx status, or an
/// unreadable body. Messages are prefixed with `provider`.
pub async fn fetch_text(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<String, SearchError> {
    let response = request
        .header("Accept", "application/json")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{provider} request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("{provider} HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{provider} response read failed: {e}")))?;

    tracing::trace!(provider, bytes = body.len(), "provider response received");
    Ok(body)
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
