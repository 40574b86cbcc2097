//! Byte-level Wyoming framing.
//!
//! Layout of one event on the wire:
//!
//! ```text
//! {"type":"audio-chunk","version":"1.5.3","data_length":42,"payload_length":2048}\n
//! <42 bytes of JSON data><2048 bytes of payload>
//! ```
//!
//! Readers also accept a `data` object inline in the header; when both are present the
//! separate data segment wins key by key. Writers always send data as a separate segment.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::codec::{Decoder, Encoder};

use super::ProtocolError;

/// Protocol version stamped on every outgoing header
pub const PROTOCOL_VERSION: &str = "1.5.3";

/// Maximum accepted header line length (1 MiB)
pub const MAX_HEADER_LENGTH: usize = 1024 * 1024;

/// Maximum accepted data segment length (1 MiB)
pub const MAX_DATA_LENGTH: usize = 1024 * 1024;

/// Maximum accepted payload length (16 MiB)
pub const MAX_PAYLOAD_LENGTH: usize = 16 * 1024 * 1024;

/// One undecoded Wyoming event: its type, merged data object and optional payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WyomingFrame {
    pub event_type: String,
    pub data: Map<String, Value>,
    pub payload: Option<Bytes>,
}

impl WyomingFrame {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: Map::new(),
            payload: None,
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_payload(mut self, payload: Bytes) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[derive(Debug, Deserialize)]
struct IncomingHeader {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    data_length: Option<usize>,
    #[serde(default)]
    payload_length: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OutgoingHeader<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_length: Option<usize>,
}

/// Header already parsed, waiting for its data and payload bytes to arrive.
#[derive(Debug)]
struct PendingFrame {
    event_type: String,
    data: Map<String, Value>,
    data_length: usize,
    payload_length: usize,
}

/// Wyoming decoder/encoder for use with `FramedRead` / `FramedWrite`.
#[derive(Debug, Default)]
pub struct WyomingCodec {
    pending: Option<PendingFrame>,
}

impl WyomingCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the next header line out of `src`, skipping blank keep-alive lines.
    fn decode_header(&mut self, src: &mut BytesMut) -> Result<bool, ProtocolError> {
        loop {
            let Some(newline) = src.iter().position(|b| *b == b'\n') else {
                if src.len() > MAX_HEADER_LENGTH {
                    return Err(ProtocolError::FrameTooLarge {
                        segment: "header",
                        length: src.len(),
                        limit: MAX_HEADER_LENGTH,
                    });
                }
                return Ok(false);
            };

            if newline > MAX_HEADER_LENGTH {
                return Err(ProtocolError::FrameTooLarge {
                    segment: "header",
                    length: newline,
                    limit: MAX_HEADER_LENGTH,
                });
            }

            let line = src.split_to(newline + 1);
            let line = line[..newline].trim_ascii();
            if line.is_empty() {
                continue;
            }

            let header: IncomingHeader = serde_json::from_slice(line)?;
            let data_length = header.data_length.unwrap_or(0);
            let payload_length = header.payload_length.unwrap_or(0);

            if data_length > MAX_DATA_LENGTH {
                return Err(ProtocolError::FrameTooLarge {
                    segment: "data",
                    length: data_length,
                    limit: MAX_DATA_LENGTH,
                });
            }
            if payload_length > MAX_PAYLOAD_LENGTH {
                return Err(ProtocolError::FrameTooLarge {
                    segment: "payload",
                    length: payload_length,
                    limit: MAX_PAYLOAD_LENGTH,
                });
            }

            self.pending = Some(PendingFrame {
                event_type: header.event_type,
                data: header.data.unwrap_or_default(),
                data_length,
                payload_length,
            });
            return Ok(true);
        }
    }
}

impl Decoder for WyomingCodec {
    type Item = WyomingFrame;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.pending.is_none() && !self.decode_header(src)? {
            return Ok(None);
        }

        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };

        let needed = pending.data_length + pending.payload_length;
        if src.len() < needed {
            src.reserve(needed - src.len());
            self.pending = Some(pending);
            return Ok(None);
        }

        let mut data = pending.data;
        if pending.data_length > 0 {
            let segment = src.split_to(pending.data_length);
            let extra: Map<String, Value> = serde_json::from_slice(&segment)?;
            data.extend(extra);
        }

        let payload = if pending.payload_length > 0 {
            Some(src.split_to(pending.payload_length).freeze())
        } else {
            None
        };

        Ok(Some(WyomingFrame {
            event_type: pending.event_type,
            data,
            payload,
        }))
    }
}

impl Encoder<WyomingFrame> for WyomingCodec {
    type Error = ProtocolError;

    fn encode(&mut self, frame: WyomingFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let data = if frame.data.is_empty() {
            None
        } else {
            Some(serde_json::to_vec(&frame.data)?)
        };
        let payload = frame.payload.filter(|payload| !payload.is_empty());

        let header = serde_json::to_vec(&OutgoingHeader {
            event_type: &frame.event_type,
            version: PROTOCOL_VERSION,
            data_length: data.as_ref().map(Vec::len),
            payload_length: payload.as_ref().map(Bytes::len),
        })?;

        let total = header.len()
            + 1
            + data.as_ref().map_or(0, Vec::len)
            + payload.as_ref().map_or(0, Bytes::len);
        dst.reserve(total);

        dst.put_slice(&header);
        dst.put_u8(b'\n');
        if let Some(data) = data {
            dst.put_slice(&data);
        }
        if let Some(payload) = payload {
            dst.put_slice(&payload);
        }

        Ok(())
    }
}
