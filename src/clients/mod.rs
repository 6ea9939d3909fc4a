//! Remote capability providers.
//!
//! Each external service sits behind a trait so the pipeline can be driven
//! by test doubles:
//! - [`HeadlineSource`] - top headlines ([`NewsApiClient`])
//! - [`ScriptWriter`] - chat completion ([`OpenAiClient`])
//! - [`SpeechSynthesizer`] - text to speech ([`OpenAiClient`])

mod news;
mod openai;

use std::io::Write;

use async_trait::async_trait;
use newscast_core::{Article, BroadcastScript};
use reqwest::StatusCode;
use thiserror::Error;

pub use news::NewsApiClient;
pub use openai::OpenAiClient;

/// User agent sent on every request; the news API rejects anonymous clients.
pub(crate) const USER_AGENT: &str = concat!("newscast/", env!("CARGO_PKG_VERSION"));

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Completion returned no text")]
    EmptyCompletion,

    #[error("Failed to write audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches the current batch of top headlines.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Articles in API response order.
    async fn top_headlines(&self) -> Result<Vec<Article>, ClientError>;
}

/// Turns a prompt into a broadcast script with one completion request.
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    async fn write_script(&self, prompt: &str) -> Result<BroadcastScript, ClientError>;
}

/// Converts text to audio, streaming the encoded bytes into `sink`.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns the number of bytes written.
    async fn synthesize(
        &self,
        input: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<u64, ClientError>;
}

/// Pass successful responses through, converting HTTP errors to ClientError.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = format!("{}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(detail)),
        StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited(detail)),
        _ => Err(ClientError::Server(detail)),
    }
}
