use std::env;
use std::str::FromStr;

use super::{BridgeMode, ServerConfig};

/// Read an environment variable, treating empty values as unset.
pub(super) fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an environment variable, reporting which variable was malformed.
pub(super) fn env_parse<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} ('{raw}'): {e}")),
        None => Ok(None),
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub(super) fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build configuration from environment variables on top of the defaults.
pub(super) fn load_from_env() -> Result<ServerConfig, String> {
    let mut config = ServerConfig::default();

    if let Some(host) = env_string("HOST") {
        config.host = host;
    }
    if let Some(port) = env_parse::<u16>("STT_PORT")? {
        config.stt_port = port;
    }
    if let Some(port) = env_parse::<u16>("TTS_PORT")? {
        config.tts_port = port;
    }
    if let Some(mode) = env_parse::<BridgeMode>("BRIDGE_MODE")? {
        config.mode = mode;
    }

    config.deepgram_api_key = env_string("DEEPGRAM_API_KEY");
    if let Some(base_url) = env_string("DEEPGRAM_BASE_URL") {
        config.deepgram_base_url = base_url;
    }
    if let Some(timeout) = env_parse::<u64>("REQUEST_TIMEOUT_SECONDS")? {
        config.request_timeout_seconds = timeout;
    }

    if let Some(model) = env_string("STT_MODEL") {
        config.stt_model = model;
    }
    if let Some(language) = env_string("STT_LANGUAGE") {
        config.stt_language = language;
    }
    if let Some(keywords) = env_string("STT_KEYWORDS") {
        config.stt_keywords = parse_keyword_list(&keywords);
    }
    config.max_utterance_bytes = env_parse::<usize>("MAX_UTTERANCE_BYTES")?;

    if let Some(model) = env_string("TTS_MODEL") {
        config.tts_model = model;
    }
    if let Some(rate) = env_parse::<u32>("TTS_OUTPUT_SAMPLE_RATE")? {
        config.tts_output_sample_rate = rate;
    }

    config.debug = env_string("DEBUG").is_some();

    Ok(config)
}
