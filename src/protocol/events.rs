use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::codec::WyomingFrame;
use super::info::Info;
use super::ProtocolError;

/// Wire names of the event types this bridge understands
pub mod event_types {
    pub const DESCRIBE: &str = "describe";
    pub const INFO: &str = "info";
    pub const AUDIO_START: &str = "audio-start";
    pub const AUDIO_CHUNK: &str = "audio-chunk";
    pub const AUDIO_STOP: &str = "audio-stop";
    pub const TRANSCRIBE: &str = "transcribe";
    pub const TRANSCRIPT: &str = "transcript";
    pub const SYNTHESIZE: &str = "synthesize";
}

/// PCM format triple carried by audio events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate in Hz
    pub rate: u32,
    /// Bytes per sample
    pub width: u16,
    pub channels: u16,
}

impl AudioFormat {
    pub const fn new(rate: u32, width: u16, channels: u16) -> Self {
        Self {
            rate,
            width,
            channels,
        }
    }
}

/// Optional voice selection on a `synthesize` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizeVoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// Typed Wyoming event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Describe,
    Info(Info),
    AudioStart {
        format: AudioFormat,
        timestamp: Option<u64>,
    },
    AudioChunk {
        /// Inbound chunks may omit the format; outbound chunks always carry it
        format: Option<AudioFormat>,
        audio: Bytes,
        timestamp: Option<u64>,
    },
    AudioStop {
        timestamp: Option<u64>,
    },
    Transcribe {
        name: Option<String>,
        language: Option<String>,
    },
    Transcript {
        text: String,
    },
    Synthesize {
        text: String,
        voice: Option<SynthesizeVoice>,
    },
    /// Any event type this bridge does not handle
    Unknown {
        event_type: String,
    },
}

impl Event {
    pub fn event_type(&self) -> &str {
        match self {
            Event::Describe => event_types::DESCRIBE,
            Event::Info(_) => event_types::INFO,
            Event::AudioStart { .. } => event_types::AUDIO_START,
            Event::AudioChunk { .. } => event_types::AUDIO_CHUNK,
            Event::AudioStop { .. } => event_types::AUDIO_STOP,
            Event::Transcribe { .. } => event_types::TRANSCRIBE,
            Event::Transcript { .. } => event_types::TRANSCRIPT,
            Event::Synthesize { .. } => event_types::SYNTHESIZE,
            Event::Unknown { event_type } => event_type,
        }
    }

    pub fn transcript(text: impl Into<String>) -> Self {
        Event::Transcript { text: text.into() }
    }
}

#[derive(Deserialize)]
struct AudioStartData {
    rate: u32,
    width: u16,
    channels: u16,
    #[serde(default)]
    timestamp: Option<u64>,
}

#[derive(Deserialize)]
struct AudioChunkData {
    #[serde(default)]
    rate: Option<u32>,
    #[serde(default)]
    width: Option<u16>,
    #[serde(default)]
    channels: Option<u16>,
    #[serde(default)]
    timestamp: Option<u64>,
}

#[derive(Deserialize)]
struct TimestampData {
    #[serde(default)]
    timestamp: Option<u64>,
}

#[derive(Deserialize)]
struct TranscribeData {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptData {
    text: String,
}

#[derive(Deserialize)]
struct SynthesizeData {
    text: String,
    #[serde(default)]
    voice: Option<SynthesizeVoice>,
}

fn parse_data<T: DeserializeOwned>(event_type: &str, data: Map<String, Value>) -> Result<T, ProtocolError> {
    serde_json::from_value(Value::Object(data)).map_err(|e| ProtocolError::InvalidEvent {
        event_type: event_type.to_string(),
        reason: e.to_string(),
    })
}

fn to_data<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn insert_timestamp(data: &mut Map<String, Value>, timestamp: Option<u64>) {
    if let Some(timestamp) = timestamp {
        data.insert("timestamp".to_string(), Value::from(timestamp));
    }
}

impl TryFrom<WyomingFrame> for Event {
    type Error = ProtocolError;

    fn try_from(frame: WyomingFrame) -> Result<Self, Self::Error> {
        let WyomingFrame {
            event_type,
            data,
            payload,
        } = frame;

        let event = match event_type.as_str() {
            event_types::DESCRIBE => Event::Describe,
            event_types::INFO => Event::Info(parse_data(&event_type, data)?),
            event_types::AUDIO_START => {
                let parsed: AudioStartData = parse_data(&event_type, data)?;
                Event::AudioStart {
                    format: AudioFormat::new(parsed.rate, parsed.width, parsed.channels),
                    timestamp: parsed.timestamp,
                }
            }
            event_types::AUDIO_CHUNK => {
                let parsed: AudioChunkData = parse_data(&event_type, data)?;
                let format = match (parsed.rate, parsed.width, parsed.channels) {
                    (Some(rate), Some(width), Some(channels)) => {
                        Some(AudioFormat::new(rate, width, channels))
                    }
                    _ => None,
                };
                Event::AudioChunk {
                    format,
                    audio: payload.unwrap_or_default(),
                    timestamp: parsed.timestamp,
                }
            }
            event_types::AUDIO_STOP => {
                let parsed: TimestampData = parse_data(&event_type, data)?;
                Event::AudioStop {
                    timestamp: parsed.timestamp,
                }
            }
            event_types::TRANSCRIBE => {
                let parsed: TranscribeData = parse_data(&event_type, data)?;
                Event::Transcribe {
                    name: parsed.name,
                    language: parsed.language,
                }
            }
            event_types::TRANSCRIPT => {
                let parsed: TranscriptData = parse_data(&event_type, data)?;
                Event::Transcript { text: parsed.text }
            }
            event_types::SYNTHESIZE => {
                let parsed: SynthesizeData = parse_data(&event_type, data)?;
                Event::Synthesize {
                    text: parsed.text,
                    voice: parsed.voice,
                }
            }
            _ => Event::Unknown { event_type },
        };

        Ok(event)
    }
}

impl From<Event> for WyomingFrame {
    fn from(event: Event) -> Self {
        let frame = WyomingFrame::new(event.event_type());

        match event {
            Event::Describe | Event::Unknown { .. } => frame,
            Event::Info(info) => frame.with_data(to_data(&info)),
            Event::AudioStart { format, timestamp } => {
                let mut data = to_data(&format);
                insert_timestamp(&mut data, timestamp);
                frame.with_data(data)
            }
            Event::AudioChunk {
                format,
                audio,
                timestamp,
            } => {
                let mut data = format.as_ref().map(to_data).unwrap_or_default();
                insert_timestamp(&mut data, timestamp);
                frame.with_data(data).with_payload(audio)
            }
            Event::AudioStop { timestamp } => {
                let mut data = Map::new();
                insert_timestamp(&mut data, timestamp);
                frame.with_data(data)
            }
            Event::Transcribe { name, language } => {
                let mut data = Map::new();
                if let Some(name) = name {
                    data.insert("name".to_string(), Value::String(name));
                }
                if let Some(language) = language {
                    data.insert("language".to_string(), Value::String(language));
                }
                frame.with_data(data)
            }
            Event::Transcript { text } => {
                let mut data = Map::new();
                data.insert("text".to_string(), Value::String(text));
                frame.with_data(data)
            }
            Event::Synthesize { text, voice } => {
                let mut data = Map::new();
                data.insert("text".to_string(), Value::String(text));
                if let Some(voice) = voice {
                    data.insert("voice".to_string(), Value::Object(to_data(&voice)));
                }
                frame.with_data(data)
            }
        }
    }
}
