//! Request and response bodies for the Deepgram REST API.
//!
//! Only the fields the bridge reads are modelled; everything else in the
//! listen response is ignored.

use serde::{Deserialize, Serialize};

// =============================================================================
// Listen (speech-to-text)
// =============================================================================

/// Body of a successful `/v1/listen` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenResponse {
    #[serde(default)]
    pub results: Option<ListenResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenResults {
    #[serde(default)]
    pub channels: Vec<ListenChannel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenChannel {
    #[serde(default)]
    pub alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListenAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ListenResponse {
    /// Top alternative of the first channel, or `""` when absent.
    pub fn transcript(&self) -> &str {
        self.first_alternative()
            .map(|alternative| alternative.transcript.as_str())
            .unwrap_or("")
    }

    pub fn confidence(&self) -> Option<f64> {
        self.first_alternative().and_then(|alternative| alternative.confidence)
    }

    fn first_alternative(&self) -> Option<&ListenAlternative> {
        self.results
            .as_ref()?
            .channels
            .first()?
            .alternatives
            .first()
    }
}

// =============================================================================
// Speak (text-to-speech)
// =============================================================================

/// JSON body of a `/v1/speak` request.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakRequest<'a> {
    pub text: &'a str,
}

// =============================================================================
// Errors
// =============================================================================

/// Error body Deepgram returns with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramErrorResponse {
    #[serde(default)]
    pub err_code: Option<String>,
    #[serde(default)]
    pub err_msg: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl DeepgramErrorResponse {
    pub fn message(&self) -> Option<String> {
        match (&self.err_code, &self.err_msg) {
            (Some(code), Some(msg)) => Some(format!("{msg} ({code})")),
            (None, Some(msg)) => Some(msg.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}
