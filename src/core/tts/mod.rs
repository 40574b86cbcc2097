//! Text-to-speech side of a session.
//!
//! A `synthesize` request is normalized, sent to the speech service in one call, and the
//! returned PCM is replayed to the client as `audio-start`, `audio-chunk`*, `audio-stop`.

mod chunker;
pub mod normalizer;

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub use chunker::{ChunkEmitter, DEFAULT_FRAME_SIZE};
pub use normalizer::normalize;

use crate::config::ServerConfig;
use crate::core::speech::SpeechService;
use crate::protocol::{AudioFormat, Event};

/// Samples per outbound audio chunk
pub const SAMPLES_PER_CHUNK: usize = 1024;

/// 16-bit linear PCM
pub const OUTPUT_SAMPLE_WIDTH: u16 = 2;

pub const OUTPUT_CHANNELS: u16 = 1;

/// Synthesized audio ready to be streamed as one bracketed sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundAudioStream {
    pub format: AudioFormat,
    pub chunks: Vec<Bytes>,
}

impl OutboundAudioStream {
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }

    /// `audio-start`, one `audio-chunk` per frame, then `audio-stop`.
    pub fn into_events(self) -> Vec<Event> {
        let format = self.format;
        let mut events = Vec::with_capacity(self.chunks.len() + 2);

        events.push(Event::AudioStart {
            format,
            timestamp: None,
        });
        events.extend(self.chunks.into_iter().map(|audio| Event::AudioChunk {
            format: Some(format),
            audio,
            timestamp: None,
        }));
        events.push(Event::AudioStop { timestamp: None });

        events
    }
}

pub struct SynthesisBridge {
    speech: Arc<dyn SpeechService>,
    config: Arc<ServerConfig>,
    chunker: ChunkEmitter,
}

impl SynthesisBridge {
    pub fn new(speech: Arc<dyn SpeechService>, config: Arc<ServerConfig>) -> Self {
        Self {
            speech,
            config,
            chunker: ChunkEmitter::new(SAMPLES_PER_CHUNK * OUTPUT_SAMPLE_WIDTH as usize),
        }
    }

    pub fn output_format(&self) -> AudioFormat {
        AudioFormat::new(
            self.config.tts_output_sample_rate,
            OUTPUT_SAMPLE_WIDTH,
            OUTPUT_CHANNELS,
        )
    }

    /// Synthesize `text` into a complete outbound stream.
    ///
    /// # Arguments
    /// * `text` - Raw request text, markdown allowed
    ///
    /// # Returns
    /// * `Option<OutboundAudioStream>` - `None` for blank input, text that normalizes to
    ///   nothing, a failed remote call, or an empty audio response. Nothing is emitted to
    ///   the client in those cases.
    pub async fn synthesize(&self, text: &str) -> Option<OutboundAudioStream> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            warn!("Empty text for TTS, skipping synthesis");
            return None;
        }

        let spoken = normalize(trimmed);
        if spoken.is_empty() {
            warn!("Text is empty after markdown removal, skipping synthesis");
            return None;
        }
        if spoken != trimmed {
            debug!("Normalized TTS text: {:?}", spoken);
        }

        info!(
            "Synthesizing {} characters with {}",
            spoken.chars().count(),
            self.config.tts_model
        );

        let audio = match self
            .speech
            .synthesize(
                &spoken,
                &self.config.tts_model,
                self.config.tts_output_sample_rate,
            )
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                error!(
                    "Synthesis via {} failed: {}",
                    self.speech.provider_name(),
                    e
                );
                return None;
            }
        };

        if audio.is_empty() {
            warn!("Speech service returned no audio");
            return None;
        }

        let chunks = self.chunker.split(audio);
        debug!("Streaming {} audio chunks", chunks.len());

        Some(OutboundAudioStream {
            format: self.output_format(),
            chunks,
        })
    }
}
