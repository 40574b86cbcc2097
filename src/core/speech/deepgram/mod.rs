//! Deepgram REST speech service.
//!
//! Transcription uses the prerecorded `/v1/listen` endpoint with the whole utterance in
//! one request; synthesis uses `/v1/speak` and receives raw PCM back. Neither call streams.

mod client;
mod config;
mod messages;

pub use client::DeepgramClient;
pub use config::{BoostParameter, DEEPGRAM_API_URL, DeepgramConfig};
pub use messages::{DeepgramErrorResponse, ListenResponse, SpeakRequest};
