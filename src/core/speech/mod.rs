//! Remote speech service abstraction
//!
//! The bridges only ever see [`SpeechService`]; the Deepgram REST client is the
//! production implementation and tests substitute recording stubs.

pub mod deepgram;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

pub use deepgram::{BoostParameter, DEEPGRAM_API_URL, DeepgramClient, DeepgramConfig};

/// Errors returned by remote speech calls.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech service credential is not configured")]
    MissingCredential,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Provider error ({status}): {body}")]
    ProviderError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type SpeechResult<T> = Result<T, SpeechError>;

/// One-shot transcription and synthesis against a hosted speech API.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Transcribe one complete utterance of raw linear PCM.
    ///
    /// `boost_terms` are vocabulary hints sent with every request.
    async fn transcribe(
        &self,
        audio: Bytes,
        sample_rate: u32,
        channels: u16,
        model: &str,
        boost_terms: &[String],
    ) -> SpeechResult<String>;

    /// Synthesize `text` to 16-bit mono linear PCM at `output_sample_rate`.
    async fn synthesize(
        &self,
        text: &str,
        model: &str,
        output_sample_rate: u32,
    ) -> SpeechResult<Bytes>;

    fn provider_name(&self) -> &'static str;
}
