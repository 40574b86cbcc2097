pub mod speech;
pub mod stt;
pub mod tts;

// Re-export commonly used types for convenience
pub use speech::{
    BoostParameter, DeepgramClient, DeepgramConfig, SpeechError, SpeechResult, SpeechService,
};

pub use stt::{AudioFrameBuffer, BufferError, BufferedUtterance, TranscriptionBridge};

pub use tts::{ChunkEmitter, OutboundAudioStream, SynthesisBridge, normalize};
