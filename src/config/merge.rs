use super::env::load_from_env;
use super::yaml::YamlConfig;
use super::{BridgeMode, ServerConfig};

/// Merge YAML overrides onto the environment-derived configuration.
///
/// Only values present in the YAML replace the environment values.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, String> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.stt_port {
            config.stt_port = port;
        }
        if let Some(port) = server.tts_port {
            config.tts_port = port;
        }
        if let Some(mode) = server.mode {
            config.mode = mode.parse::<BridgeMode>()?;
        }
    }

    if let Some(deepgram) = yaml.deepgram {
        if let Some(api_key) = deepgram.api_key.filter(|key| !key.is_empty()) {
            config.deepgram_api_key = Some(api_key);
        }
        if let Some(base_url) = deepgram.base_url {
            config.deepgram_base_url = base_url;
        }
        if let Some(timeout) = deepgram.request_timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
    }

    if let Some(stt) = yaml.stt {
        if let Some(model) = stt.model {
            config.stt_model = model;
        }
        if let Some(language) = stt.language {
            config.stt_language = language;
        }
        if let Some(keywords) = stt.keywords {
            config.stt_keywords = keywords
                .into_iter()
                .map(|term| term.trim().to_string())
                .filter(|term| !term.is_empty())
                .collect();
        }
        if let Some(limit) = stt.max_utterance_bytes {
            config.max_utterance_bytes = Some(limit);
        }
    }

    if let Some(tts) = yaml.tts {
        if let Some(model) = tts.model {
            config.tts_model = model;
        }
        if let Some(rate) = tts.output_sample_rate {
            config.tts_output_sample_rate = rate;
        }
    }

    if let Some(debug) = yaml.logging.and_then(|logging| logging.debug) {
        config.debug = debug;
    }

    Ok(config)
}
