//! Configuration module for the Wyoming Deepgram bridge
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use wyoming_deepgram::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//! config.validate()?;
//!
//! println!("Transcription on {}", config.stt_address());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

use crate::core::speech::DEEPGRAM_API_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STT_PORT: u16 = 10300;
pub const DEFAULT_TTS_PORT: u16 = 10200;
pub const DEFAULT_STT_MODEL: &str = "nova-2";
pub const DEFAULT_TTS_MODEL: &str = "aura-asteria-en";
pub const DEFAULT_OUTPUT_SAMPLE_RATE: u32 = 16000;
pub const DEFAULT_STT_LANGUAGE: &str = "en";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// How capabilities are laid out across listening ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeMode {
    /// Transcription and synthesis share `stt_port`
    #[default]
    Combined,
    /// Transcription on `stt_port`, synthesis on `tts_port`
    Split,
}

impl BridgeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combined => "combined",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for BridgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BridgeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combined" | "single" => Ok(Self::Combined),
            "split" | "separate" => Ok(Self::Split),
            other => Err(format!(
                "Invalid bridge mode '{other}': expected 'combined' or 'split'"
            )),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub stt_port: u16,
    pub tts_port: u16,
    pub mode: BridgeMode,

    // Deepgram account
    pub deepgram_api_key: Option<String>,
    pub deepgram_base_url: String,
    /// Per-request timeout in seconds; 0 disables it
    pub request_timeout_seconds: u64,

    // Transcription
    pub stt_model: String,
    pub stt_language: String,
    /// Vocabulary boost terms sent with every transcription
    pub stt_keywords: Vec<String>,
    /// Utterance size cap in bytes; `None` is unbounded
    pub max_utterance_bytes: Option<usize>,

    // Synthesis
    pub tts_model: String,
    pub tts_output_sample_rate: u32,

    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            stt_port: DEFAULT_STT_PORT,
            tts_port: DEFAULT_TTS_PORT,
            mode: BridgeMode::default(),
            deepgram_api_key: None,
            deepgram_base_url: DEEPGRAM_API_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            stt_model: DEFAULT_STT_MODEL.to_string(),
            stt_language: DEFAULT_STT_LANGUAGE.to_string(),
            stt_keywords: Vec::new(),
            max_utterance_bytes: None,
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            tts_output_sample_rate: DEFAULT_OUTPUT_SAMPLE_RATE,
            debug: false,
        }
    }
}

/// Zeroize the Deepgram key when the configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.deepgram_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env`, if already loaded).
    ///
    /// The result is not validated; call [`ServerConfig::validate`] once every
    /// override (e.g. CLI flags) has been applied.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(env::load_from_env()?)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if the YAML file cannot be read or is malformed, or an environment
    /// variable has an invalid format. Like [`ServerConfig::from_env`], the result is not
    /// validated.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        // .env is loaded into the process environment by main.rs before this runs
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        Ok(merge::merge_config(Some(yaml_config))?)
    }

    pub fn validate(&self) -> Result<(), String> {
        validation::validate_ports(self.mode, self.stt_port, self.tts_port)?;
        validation::validate_sample_rate(self.tts_output_sample_rate)?;
        validation::validate_base_url(&self.deepgram_base_url)?;
        validation::validate_models(&self.stt_model, &self.tts_model)?;
        Ok(())
    }

    pub fn stt_address(&self) -> String {
        format!("{}:{}", self.host, self.stt_port)
    }

    pub fn tts_address(&self) -> String {
        format!("{}:{}", self.host, self.tts_port)
    }

    pub fn has_credential(&self) -> bool {
        self.deepgram_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0).then(|| Duration::from_secs(self.request_timeout_seconds))
    }
}
