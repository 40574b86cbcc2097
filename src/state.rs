use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::speech::{DeepgramClient, DeepgramConfig, SpeechError, SpeechService};
use crate::handlers::{Capabilities, build_info};
use crate::protocol::Info;

/// Read-only state shared by every connection.
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub speech: Arc<dyn SpeechService>,
    combined_info: Arc<Info>,
    transcription_info: Arc<Info>,
    synthesis_info: Arc<Info>,
}

impl AppState {
    /// State backed by the Deepgram REST client.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, SpeechError> {
        let client = DeepgramClient::new(DeepgramConfig::from_server_config(&config))?;
        Ok(Self::with_speech_service(config, Arc::new(client)))
    }

    /// State backed by any speech service.
    pub fn with_speech_service(config: ServerConfig, speech: Arc<dyn SpeechService>) -> Arc<Self> {
        let combined_info = Arc::new(build_info(&config, Capabilities::Combined));
        let transcription_info = Arc::new(build_info(&config, Capabilities::TranscriptionOnly));
        let synthesis_info = Arc::new(build_info(&config, Capabilities::SynthesisOnly));

        Arc::new(Self {
            config: Arc::new(config),
            speech,
            combined_info,
            transcription_info,
            synthesis_info,
        })
    }

    pub fn info_for(&self, capabilities: Capabilities) -> Arc<Info> {
        match capabilities {
            Capabilities::Combined => self.combined_info.clone(),
            Capabilities::TranscriptionOnly => self.transcription_info.clone(),
            Capabilities::SynthesisOnly => self.synthesis_info.clone(),
        }
    }
}
