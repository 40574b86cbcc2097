//! Wyoming event protocol
//!
//! Home Assistant voice satellites and pipelines talk to speech services over the
//! Wyoming protocol: a stream of typed events, each a JSON header line followed by
//! optional JSON data and an optional binary payload.
//!
//! # Modules
//! - `codec`: byte-level framing (`tokio_util` decoder/encoder)
//! - `events`: typed events the bridge consumes and produces
//! - `info`: capability advertisement payload returned for `describe`

pub mod codec;
pub mod events;
pub mod info;

use thiserror::Error;

pub use codec::{
    MAX_DATA_LENGTH, MAX_HEADER_LENGTH, MAX_PAYLOAD_LENGTH, PROTOCOL_VERSION, WyomingCodec,
    WyomingFrame,
};
pub use events::{AudioFormat, Event, SynthesizeVoice, event_types};
pub use info::{AsrModel, AsrProgram, Attribution, Info, TtsProgram, TtsVoice};

/// Errors raised while reading or writing Wyoming events.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header line or data segment was not valid JSON
    #[error("Malformed event JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A frame segment exceeded the configured limit
    #[error("Event {segment} too large: {length} bytes (limit {limit})")]
    FrameTooLarge {
        segment: &'static str,
        length: usize,
        limit: usize,
    },

    /// A known event type carried missing or invalid fields
    #[error("Invalid {event_type} event: {reason}")]
    InvalidEvent { event_type: String, reason: String },
}
