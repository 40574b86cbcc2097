use super::BridgeMode;

pub(super) fn validate_ports(mode: BridgeMode, stt_port: u16, tts_port: u16) -> Result<(), String> {
    if stt_port == 0 {
        return Err("STT port must be non-zero".to_string());
    }
    if mode == BridgeMode::Split {
        if tts_port == 0 {
            return Err("TTS port must be non-zero in split mode".to_string());
        }
        if stt_port == tts_port {
            return Err(format!(
                "STT and TTS ports must differ in split mode (both are {stt_port})"
            ));
        }
    }
    Ok(())
}

pub(super) fn validate_sample_rate(rate: u32) -> Result<(), String> {
    if rate == 0 {
        return Err("TTS output sample rate must be greater than zero".to_string());
    }
    Ok(())
}

pub(super) fn validate_base_url(url: &str) -> Result<(), String> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| format!("Invalid Deepgram base URL '{url}': {e}"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "Deepgram base URL must use http or https, got '{scheme}'"
        )),
    }
}

pub(super) fn validate_models(stt_model: &str, tts_model: &str) -> Result<(), String> {
    if stt_model.trim().is_empty() {
        return Err("STT model must not be empty".to_string());
    }
    if tts_model.trim().is_empty() {
        return Err("TTS model must not be empty".to_string());
    }
    Ok(())
}
