use bytes::Bytes;

/// Default outbound frame: 1024 samples of 16-bit audio
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Splits synthesized audio into bounded frames for streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEmitter {
    frame_size: usize,
}

impl ChunkEmitter {
    /// A zero frame size is bumped to one byte.
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size: frame_size.max(1),
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn frame_count(&self, len: usize) -> usize {
        len.div_ceil(self.frame_size)
    }

    /// Frames share `audio`'s allocation; only the last may be short.
    pub fn split(&self, mut audio: Bytes) -> Vec<Bytes> {
        let mut frames = Vec::with_capacity(self.frame_count(audio.len()));
        while audio.len() > self.frame_size {
            frames.push(audio.split_to(self.frame_size));
        }
        if !audio.is_empty() {
            frames.push(audio);
        }
        frames
    }
}

impl Default for ChunkEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_SIZE)
    }
}
