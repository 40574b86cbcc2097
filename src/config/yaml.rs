use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here override
/// environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   stt_port: 10300
///   tts_port: 10200
///   mode: "split"
///
/// deepgram:
///   api_key: "your-deepgram-key"
///   base_url: "https://api.deepgram.com"
///   request_timeout_seconds: 30
///
/// stt:
///   model: "nova-3"
///   language: "en"
///   keywords:
///     - "Jarvis"
///     - "Zigbee"
///   max_utterance_bytes: 3840000
///
/// tts:
///   model: "aura-asteria-en"
///   output_sample_rate: 16000
///
/// logging:
///   debug: false
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub deepgram: Option<DeepgramYaml>,
    pub stt: Option<SttYaml>,
    pub tts: Option<TtsYaml>,
    pub logging: Option<LoggingYaml>,
}

/// Listener configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub stt_port: Option<u16>,
    pub tts_port: Option<u16>,
    /// "combined" or "split"
    pub mode: Option<String>,
}

/// Deepgram account configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DeepgramYaml {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

/// Transcription configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SttYaml {
    pub model: Option<String>,
    pub language: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub max_utterance_bytes: Option<usize>,
}

/// Synthesis configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TtsYaml {
    pub model: Option<String>,
    pub output_sample_rate: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingYaml {
    pub debug: Option<bool>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
