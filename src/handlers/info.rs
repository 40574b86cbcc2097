//! Capability advertisement returned for `describe`.

use crate::config::ServerConfig;
use crate::protocol::{AsrModel, AsrProgram, Attribution, Info, TtsProgram, TtsVoice};

use super::session::Capabilities;

pub const PROGRAM_NAME: &str = "deepgram";
pub const ASR_DESCRIPTION: &str = "Deepgram Nova speech-to-text";
pub const TTS_DESCRIPTION: &str = "Deepgram Aura text-to-speech";

fn attribution() -> Attribution {
    Attribution {
        name: "Deepgram".to_string(),
        url: "https://deepgram.com".to_string(),
    }
}

fn version() -> Option<String> {
    Some(env!("CARGO_PKG_VERSION").to_string())
}

fn asr_program(config: &ServerConfig) -> AsrProgram {
    AsrProgram {
        name: PROGRAM_NAME.to_string(),
        description: Some(ASR_DESCRIPTION.to_string()),
        attribution: attribution(),
        installed: true,
        version: version(),
        models: vec![AsrModel {
            name: config.stt_model.clone(),
            description: Some(format!("Deepgram {}", config.stt_model)),
            attribution: attribution(),
            installed: true,
            languages: vec![config.stt_language.clone()],
            version: version(),
        }],
    }
}

fn tts_program(config: &ServerConfig) -> TtsProgram {
    TtsProgram {
        name: PROGRAM_NAME.to_string(),
        description: Some(TTS_DESCRIPTION.to_string()),
        attribution: attribution(),
        installed: true,
        version: version(),
        voices: vec![TtsVoice {
            name: config.tts_model.clone(),
            description: Some(format!("Deepgram {}", config.tts_model)),
            attribution: attribution(),
            installed: true,
            languages: vec![config.stt_language.clone()],
            version: version(),
        }],
    }
}

/// Build the advertisement for a listener serving `capabilities`.
pub fn build_info(config: &ServerConfig, capabilities: Capabilities) -> Info {
    Info {
        asr: if capabilities.transcription() {
            vec![asr_program(config)]
        } else {
            Vec::new()
        },
        tts: if capabilities.synthesis() {
            vec![tts_program(config)]
        } else {
            Vec::new()
        },
    }
}
