//! Wyoming connection loop
//!
//! One reader loop per connection feeds the [`SessionRouter`] strictly in order, and a
//! writer task drains outbound events from a bounded channel so replies keep their
//! emission order.

use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, error, info, warn};

use crate::core::stt::TranscriptionBridge;
use crate::core::tts::SynthesisBridge;
use crate::protocol::{Event, WyomingCodec, WyomingFrame};
use crate::state::AppState;

use super::router::{Capabilities, SessionRouter};

/// Outbound events buffered per connection
const CHANNEL_BUFFER_SIZE: usize = 64;

/// Build a fresh router for one connection.
pub fn new_session_router(state: &AppState, capabilities: Capabilities) -> SessionRouter {
    SessionRouter::new(
        capabilities,
        state.info_for(capabilities),
        TranscriptionBridge::new(state.speech.clone(), state.config.clone()),
        SynthesisBridge::new(state.speech.clone(), state.config.clone()),
    )
}

/// Serve one Wyoming connection until EOF, a framing error, or a write failure.
pub async fn serve_connection<S>(stream: S, state: Arc<AppState>, capabilities: Capabilities)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    info!("Wyoming connection established ({:?})", capabilities);

    let (reader, writer) = tokio::io::split(stream);
    let mut frames = FramedRead::new(reader, WyomingCodec::new());
    let mut sink = FramedWrite::new(writer, WyomingCodec::new());

    let (events_tx, mut events_rx) = mpsc::channel::<Event>(CHANNEL_BUFFER_SIZE);

    let writer_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            debug!("Sending {} event", event.event_type());
            if let Err(e) = sink.send(WyomingFrame::from(event)).await {
                error!("Failed to write Wyoming event: {}", e);
                break;
            }
        }
    });

    let mut router = new_session_router(&state, capabilities);

    while let Some(next) = frames.next().await {
        let frame = match next {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Wyoming framing error, closing connection: {}", e);
                break;
            }
        };

        let event = match Event::try_from(frame) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring malformed event: {}", e);
                continue;
            }
        };

        debug!("Received {} event", event.event_type());
        if !router.handle_event(event, &events_tx).await {
            break;
        }
    }

    // Let the writer flush everything already queued
    drop(events_tx);
    if let Err(e) = writer_task.await {
        error!("Writer task failed: {}", e);
    }

    info!("Wyoming connection closed");
}
