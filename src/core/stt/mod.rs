//! Speech-to-text side of a session.
//!
//! [`TranscriptionBridge`] buffers one utterance between `audio-start` and
//! `audio-stop` and turns it into a single transcript string.

mod buffer;

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub use buffer::{AudioFrameBuffer, BufferError, BufferedUtterance};

use crate::config::ServerConfig;
use crate::core::speech::SpeechService;
use crate::protocol::AudioFormat;

pub struct TranscriptionBridge {
    buffer: AudioFrameBuffer,
    speech: Arc<dyn SpeechService>,
    config: Arc<ServerConfig>,
}

impl TranscriptionBridge {
    pub fn new(speech: Arc<dyn SpeechService>, config: Arc<ServerConfig>) -> Self {
        Self {
            buffer: AudioFrameBuffer::with_limit(config.max_utterance_bytes),
            speech,
            config,
        }
    }

    pub fn begin_utterance(&mut self, format: AudioFormat) {
        if self.buffer.is_open() && !self.buffer.is_empty() {
            debug!(
                "Discarding {} buffered bytes from unfinished utterance",
                self.buffer.len()
            );
        }
        debug!(
            "Utterance started (rate={}, width={}, channels={})",
            format.rate, format.width, format.channels
        );
        self.buffer.open(format);
    }

    /// Buffer one audio fragment. Fragments outside an utterance are dropped.
    pub fn push_audio(&mut self, audio: &[u8]) {
        let already_overflowed = self.buffer.is_overflowed();
        match self.buffer.append(audio) {
            Ok(()) => {}
            Err(BufferError::NotOpen) => {
                debug!("Ignoring {} audio bytes outside an utterance", audio.len());
            }
            Err(e @ BufferError::UtteranceTooLong { .. }) => {
                if !already_overflowed {
                    warn!("{}; dropping further audio until audio-stop", e);
                }
            }
        }
    }

    /// End the utterance and transcribe it.
    ///
    /// # Returns
    /// * `String` - The transcript. Empty when nothing was buffered, the utterance was
    ///   too long, or the remote call failed; the buffer is left closed and empty
    pub async fn finish_utterance(&mut self) -> String {
        let Some(utterance) = self.buffer.drain() else {
            debug!("audio-stop without an open utterance");
            return String::new();
        };

        if utterance.overflowed {
            warn!(
                "Utterance too long (limit {:?} bytes), skipping transcription",
                self.config.max_utterance_bytes
            );
            return String::new();
        }

        if utterance.audio.is_empty() {
            debug!("Empty utterance, skipping transcription");
            return String::new();
        }

        self.transcribe(utterance.audio, utterance.format).await
    }

    async fn transcribe(&self, audio: Bytes, format: AudioFormat) -> String {
        let audio_len = audio.len();
        match self
            .speech
            .transcribe(
                audio,
                format.rate,
                format.channels,
                &self.config.stt_model,
                &self.config.stt_keywords,
            )
            .await
        {
            Ok(text) => {
                info!("Transcript ({} audio bytes): {:?}", audio_len, text);
                text
            }
            Err(e) => {
                error!(
                    "Transcription via {} failed: {}",
                    self.speech.provider_name(),
                    e
                );
                String::new()
            }
        }
    }

    pub fn buffered_bytes(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_utterance_open(&self) -> bool {
        self.buffer.is_open()
    }
}
