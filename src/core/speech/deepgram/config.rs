//! Configuration types for the Deepgram REST client.

use std::fmt;
use std::time::Duration;
use zeroize::Zeroizing;

use crate::config::ServerConfig;

/// Default Deepgram API base URL
pub const DEEPGRAM_API_URL: &str = "https://api.deepgram.com";

/// PCM encoding requested from and declared to Deepgram
pub const LINEAR16_ENCODING: &str = "linear16";

// =============================================================================
// Boost Parameter
// =============================================================================

/// Query parameter used to pass vocabulary boost terms.
///
/// Nova-3 models take `keyterm`; earlier generations take `keywords`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostParameter {
    Keyterm,
    Keywords,
}

impl BoostParameter {
    /// Select the parameter by model id prefix.
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("nova-3") {
            Self::Keyterm
        } else {
            Self::Keywords
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyterm => "keyterm",
            Self::Keywords => "keywords",
        }
    }
}

impl fmt::Display for BoostParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Connection settings for [`super::DeepgramClient`].
#[derive(Clone)]
pub struct DeepgramConfig {
    /// API key; `None` leaves the client in degraded mode
    pub api_key: Option<Zeroizing<String>>,
    pub base_url: String,
    /// `None` disables the per-request timeout
    pub request_timeout: Option<Duration>,
}

impl DeepgramConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()).map(Zeroizing::new),
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_server_config(config: &ServerConfig) -> Self {
        Self::new(config.deepgram_api_key.clone(), config.deepgram_base_url.clone())
            .with_timeout(config.request_timeout())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn listen_url(&self) -> String {
        format!("{}/v1/listen", self.base())
    }

    pub fn speak_url(&self) -> String {
        format!("{}/v1/speak", self.base())
    }
}

impl fmt::Debug for DeepgramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepgramConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for DeepgramConfig {
    fn default() -> Self {
        Self::new(None, DEEPGRAM_API_URL)
    }
}
