//! Per-utterance PCM accumulation.

use bytes::{Bytes, BytesMut};
use thiserror::Error;

use crate::protocol::AudioFormat;

/// Initial capacity for a fresh utterance (~2s of 16kHz 16-bit mono)
const INITIAL_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Audio buffer is not open")]
    NotOpen,

    #[error("Utterance too long: {attempted} bytes exceeds limit of {limit}")]
    UtteranceTooLong { attempted: usize, limit: usize },
}

/// A drained utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedUtterance {
    pub audio: Bytes,
    pub format: AudioFormat,
    /// The utterance hit the size limit; `audio` holds only what fit
    pub overflowed: bool,
}

/// Append-only PCM buffer for one utterance.
///
/// The format is fixed by [`open`](Self::open) and kept until [`drain`](Self::drain).
/// Bytes are stored as received; nothing inspects the samples.
#[derive(Debug, Default)]
pub struct AudioFrameBuffer {
    format: Option<AudioFormat>,
    data: BytesMut,
    max_bytes: Option<usize>,
    overflowed: bool,
}

impl AudioFrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that refuses to grow past `max_bytes`.
    pub fn with_limit(max_bytes: Option<usize>) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    /// Start a new utterance, discarding anything buffered.
    pub fn open(&mut self, format: AudioFormat) {
        self.data.clear();
        if self.data.capacity() < INITIAL_CAPACITY {
            self.data.reserve(INITIAL_CAPACITY);
        }
        self.format = Some(format);
        self.overflowed = false;
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if self.format.is_none() {
            return Err(BufferError::NotOpen);
        }

        if let Some(limit) = self.max_bytes {
            let attempted = self.data.len() + bytes.len();
            if self.overflowed || attempted > limit {
                self.overflowed = true;
                return Err(BufferError::UtteranceTooLong { attempted, limit });
            }
        }

        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Take the utterance and return to the unopened state.
    ///
    /// Returns `None` when no utterance was open.
    pub fn drain(&mut self) -> Option<BufferedUtterance> {
        let format = self.format.take()?;
        let audio = self.data.split().freeze();
        let overflowed = std::mem::take(&mut self.overflowed);

        Some(BufferedUtterance {
            audio,
            format,
            overflowed,
        })
    }

    pub fn is_open(&self) -> bool {
        self.format.is_some()
    }

    pub fn format(&self) -> Option<AudioFormat> {
        self.format
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}
