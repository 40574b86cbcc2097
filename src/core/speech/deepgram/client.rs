//! Deepgram REST client implementing [`SpeechService`].

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info};

use super::config::{BoostParameter, DeepgramConfig, LINEAR16_ENCODING};
use super::messages::{DeepgramErrorResponse, ListenResponse, SpeakRequest};
use crate::core::speech::{SpeechError, SpeechResult, SpeechService};

/// Deepgram client shared by every session.
///
/// Holds one pooled HTTP client; each call is a single unary request.
#[derive(Debug, Clone)]
pub struct DeepgramClient {
    config: DeepgramConfig,
    http_client: Client,
}

impl DeepgramClient {
    pub fn new(config: DeepgramConfig) -> SpeechResult<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(4);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            SpeechError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &DeepgramConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn authorization(&self) -> SpeechResult<String> {
        self.config
            .api_key
            .as_ref()
            .map(|key| format!("Token {}", key.as_str()))
            .ok_or(SpeechError::MissingCredential)
    }

    /// Query pairs for `/v1/listen`, with one pair per boost term.
    pub fn listen_query(
        sample_rate: u32,
        channels: u16,
        model: &str,
        boost_terms: &[String],
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("model", model.to_string()),
            ("encoding", LINEAR16_ENCODING.to_string()),
            ("sample_rate", sample_rate.to_string()),
            ("channels", channels.to_string()),
        ];

        let boost = BoostParameter::for_model(model).as_str();
        query.extend(boost_terms.iter().map(|term| (boost, term.clone())));
        query
    }

    /// Query pairs for `/v1/speak`.
    pub fn speak_query(model: &str, output_sample_rate: u32) -> Vec<(&'static str, String)> {
        vec![
            ("model", model.to_string()),
            ("encoding", LINEAR16_ENCODING.to_string()),
            ("sample_rate", output_sample_rate.to_string()),
            ("container", "none".to_string()),
        ]
    }

    fn map_request_error(&self, e: reqwest::Error) -> SpeechError {
        if e.is_timeout() {
            SpeechError::Timeout(self.config.request_timeout.unwrap_or(Duration::ZERO))
        } else {
            SpeechError::NetworkError(format!("Request failed: {e}"))
        }
    }

    /// Turn a non-2xx response into the matching error.
    async fn error_from_response(&self, response: Response) -> SpeechError {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.map_request_error(e),
        };

        let message = serde_json::from_str::<DeepgramErrorResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.message())
            .unwrap_or_else(|| body.clone());

        error!("Deepgram API error ({}): {}", status, message);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SpeechError::AuthenticationFailed(message)
            }
            _ => SpeechError::ProviderError {
                status: status.as_u16(),
                body: message,
            },
        }
    }
}

#[async_trait]
impl SpeechService for DeepgramClient {
    async fn transcribe(
        &self,
        audio: Bytes,
        sample_rate: u32,
        channels: u16,
        model: &str,
        boost_terms: &[String],
    ) -> SpeechResult<String> {
        let authorization = self.authorization()?;
        let audio_len = audio.len();

        debug!(
            "Sending {} bytes to Deepgram listen (model={}, rate={}, channels={}, boost_terms={})",
            audio_len,
            model,
            sample_rate,
            channels,
            boost_terms.len()
        );

        let response = self
            .http_client
            .post(self.config.listen_url())
            .query(&Self::listen_query(sample_rate, channels, model, boost_terms))
            .header("Authorization", authorization)
            .header("Content-Type", "application/octet-stream")
            .body(audio)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let body = response.bytes().await.map_err(|e| self.map_request_error(e))?;
        let parsed: ListenResponse = serde_json::from_slice(&body)
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse listen response: {e}")))?;

        let transcript = parsed.transcript().to_string();
        info!(
            "Transcription complete: {} characters from {} audio bytes",
            transcript.chars().count(),
            audio_len
        );

        Ok(transcript)
    }

    async fn synthesize(
        &self,
        text: &str,
        model: &str,
        output_sample_rate: u32,
    ) -> SpeechResult<Bytes> {
        let authorization = self.authorization()?;

        debug!(
            "Sending {} characters to Deepgram speak (model={}, rate={})",
            text.chars().count(),
            model,
            output_sample_rate
        );

        let response = self
            .http_client
            .post(self.config.speak_url())
            .query(&Self::speak_query(model, output_sample_rate))
            .header("Authorization", authorization)
            .json(&SpeakRequest { text })
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(self.error_from_response(response).await);
        }

        let audio = response.bytes().await.map_err(|e| self.map_request_error(e))?;
        info!("Synthesis complete: {} audio bytes", audio.len());

        Ok(audio)
    }

    fn provider_name(&self) -> &'static str {
        "deepgram"
    }
}
