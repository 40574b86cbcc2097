use serde::{Deserialize, Serialize};

/// Who provides a program, model or voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub name: String,
    pub url: String,
}

/// One transcription model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrModel {
    /// Model identifier (e.g. `nova-2`)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribution: Attribution,
    pub installed: bool,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A speech-to-text service and the models it offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrProgram {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribution: Attribution,
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub models: Vec<AsrModel>,
}

/// One synthesis voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsVoice {
    /// Voice identifier (e.g. `aura-asteria-en`)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribution: Attribution,
    pub installed: bool,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A text-to-speech service and the voices it offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsProgram {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attribution: Attribution,
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub voices: Vec<TtsVoice>,
}

/// Payload of the `info` event sent in reply to `describe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub asr: Vec<AsrProgram>,
    #[serde(default)]
    pub tts: Vec<TtsProgram>,
}

impl Info {
    pub fn is_empty(&self) -> bool {
        self.asr.is_empty() && self.tts.is_empty()
    }
}
