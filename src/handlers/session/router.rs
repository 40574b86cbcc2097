//! Per-connection event router.
//!
//! Routing is a pure lookup on `(Mode, EventKind)`; [`SessionRouter::handle_event`]
//! performs the side effects the chosen [`Route`] names.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::stt::TranscriptionBridge;
use crate::core::tts::SynthesisBridge;
use crate::protocol::{Event, Info};

/// Which capability the session is currently serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Transcribing,
    Synthesizing,
}

/// Payload-free classification of an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Describe,
    Synthesize,
    AudioStart,
    AudioChunk,
    AudioStop,
    Other,
}

impl EventKind {
    pub fn of(event: &Event) -> Self {
        match event {
            Event::Describe => Self::Describe,
            Event::Synthesize { .. } => Self::Synthesize,
            Event::AudioStart { .. } => Self::AudioStart,
            Event::AudioChunk { .. } => Self::AudioChunk,
            Event::AudioStop { .. } => Self::AudioStop,
            Event::Info(_)
            | Event::Transcribe { .. }
            | Event::Transcript { .. }
            | Event::Unknown { .. } => Self::Other,
        }
    }
}

/// What to do with an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Describe,
    BeginSynthesis,
    OpenUtterance,
    AppendAudio,
    FinishUtterance,
    Ignore,
}

/// Capabilities served on one listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capabilities {
    Combined,
    TranscriptionOnly,
    SynthesisOnly,
}

impl Capabilities {
    pub fn transcription(&self) -> bool {
        matches!(self, Self::Combined | Self::TranscriptionOnly)
    }

    pub fn synthesis(&self) -> bool {
        matches!(self, Self::Combined | Self::SynthesisOnly)
    }

    /// Drop routes for a capability this listener does not serve.
    pub fn permit(&self, route: Route) -> Route {
        match route {
            Route::BeginSynthesis if !self.synthesis() => Route::Ignore,
            Route::OpenUtterance | Route::AppendAudio | Route::FinishUtterance
                if !self.transcription() =>
            {
                Route::Ignore
            }
            other => other,
        }
    }
}

/// Transition table.
///
/// `describe`, `synthesize` and `audio-start` act the same in every mode. Chunk and
/// stop only reach the transcription bridge while an utterance is being transcribed.
pub fn route(mode: Mode, kind: EventKind) -> Route {
    match (mode, kind) {
        (_, EventKind::Describe) => Route::Describe,
        (_, EventKind::Synthesize) => Route::BeginSynthesis,
        (_, EventKind::AudioStart) => Route::OpenUtterance,
        (Mode::Transcribing, EventKind::AudioChunk) => Route::AppendAudio,
        (Mode::Transcribing, EventKind::AudioStop) => Route::FinishUtterance,
        (Mode::Idle | Mode::Synthesizing, EventKind::AudioChunk | EventKind::AudioStop) => {
            Route::Ignore
        }
        (_, EventKind::Other) => Route::Ignore,
    }
}

/// State machine for one Wyoming connection.
pub struct SessionRouter {
    mode: Mode,
    capabilities: Capabilities,
    info: Arc<Info>,
    transcription: TranscriptionBridge,
    synthesis: SynthesisBridge,
}

impl SessionRouter {
    pub fn new(
        capabilities: Capabilities,
        info: Arc<Info>,
        transcription: TranscriptionBridge,
        synthesis: SynthesisBridge,
    ) -> Self {
        Self {
            mode: Mode::Idle,
            capabilities,
            info,
            transcription,
            synthesis,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Transcription side of the session, exposed for inspection.
    pub fn transcription(&self) -> &TranscriptionBridge {
        &self.transcription
    }

    /// Handle one inbound event, sending any replies on `events_tx`.
    ///
    /// Events are handled strictly one at a time; a remote speech call is awaited in
    /// full before this returns.
    ///
    /// # Arguments
    /// * `event` - The decoded inbound event
    /// * `events_tx` - Channel to the connection's writer task
    ///
    /// # Returns
    /// * `bool` - `false` only when the outbound channel has closed; unknown or
    ///   out-of-order events never end the session
    pub async fn handle_event(&mut self, event: Event, events_tx: &mpsc::Sender<Event>) -> bool {
        let kind = EventKind::of(&event);
        let next = self.capabilities.permit(route(self.mode, kind));

        match (next, event) {
            (Route::Describe, _) => {
                debug!("Answering describe");
                send(events_tx, Event::Info(self.info.as_ref().clone())).await
            }
            (Route::BeginSynthesis, Event::Synthesize { text, .. }) => {
                self.mode = Mode::Synthesizing;
                info!("Synthesis requested ({} characters)", text.chars().count());

                let mut open = true;
                if let Some(stream) = self.synthesis.synthesize(&text).await {
                    for outbound in stream.into_events() {
                        if !send(events_tx, outbound).await {
                            open = false;
                            break;
                        }
                    }
                }

                self.mode = Mode::Idle;
                open
            }
            (Route::OpenUtterance, Event::AudioStart { format, .. }) => {
                self.mode = Mode::Transcribing;
                self.transcription.begin_utterance(format);
                true
            }
            (Route::AppendAudio, Event::AudioChunk { audio, .. }) => {
                self.transcription.push_audio(&audio);
                true
            }
            (Route::FinishUtterance, Event::AudioStop { .. }) => {
                let text = self.transcription.finish_utterance().await;
                send(events_tx, Event::transcript(text)).await
            }
            (_, event) => {
                debug!(
                    "Ignoring {} event in {:?} mode",
                    event.event_type(),
                    self.mode
                );
                true
            }
        }
    }
}

async fn send(events_tx: &mpsc::Sender<Event>, event: Event) -> bool {
    if events_tx.send(event).await.is_err() {
        debug!("Outbound channel closed, ending session");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [Mode; 3] = [Mode::Idle, Mode::Transcribing, Mode::Synthesizing];

    #[test]
    fn test_mode_independent_routes() {
        for mode in MODES {
            assert_eq!(route(mode, EventKind::Describe), Route::Describe);
            assert_eq!(route(mode, EventKind::Synthesize), Route::BeginSynthesis);
            assert_eq!(route(mode, EventKind::AudioStart), Route::OpenUtterance);
            assert_eq!(route(mode, EventKind::Other), Route::Ignore);
        }
    }

    #[test]
    fn test_audio_only_routes_while_transcribing() {
        assert_eq!(
            route(Mode::Transcribing, EventKind::AudioChunk),
            Route::AppendAudio
        );
        assert_eq!(
            route(Mode::Transcribing, EventKind::AudioStop),
            Route::FinishUtterance
        );

        for mode in [Mode::Idle, Mode::Synthesizing] {
            assert_eq!(route(mode, EventKind::AudioChunk), Route::Ignore);
            assert_eq!(route(mode, EventKind::AudioStop), Route::Ignore);
        }
    }

    #[test]
    fn test_capabilities_filter_routes() {
        let stt = Capabilities::TranscriptionOnly;
        assert_eq!(stt.permit(Route::BeginSynthesis), Route::Ignore);
        assert_eq!(stt.permit(Route::OpenUtterance), Route::OpenUtterance);
        assert_eq!(stt.permit(Route::Describe), Route::Describe);

        let tts = Capabilities::SynthesisOnly;
        assert_eq!(tts.permit(Route::BeginSynthesis), Route::BeginSynthesis);
        assert_eq!(tts.permit(Route::OpenUtterance), Route::Ignore);
        assert_eq!(tts.permit(Route::AppendAudio), Route::Ignore);
        assert_eq!(tts.permit(Route::FinishUtterance), Route::Ignore);

        for route in [
            Route::Describe,
            Route::BeginSynthesis,
            Route::OpenUtterance,
            Route::AppendAudio,
            Route::FinishUtterance,
            Route::Ignore,
        ] {
            assert_eq!(Capabilities::Combined.permit(route), route);
        }
    }

    #[test]
    fn test_event_kind_classification() {
        assert_eq!(EventKind::of(&Event::Describe), EventKind::Describe);
        assert_eq!(
            EventKind::of(&Event::Transcribe {
                name: None,
                language: Some("en".to_string())
            }),
            EventKind::Other
        );
        assert_eq!(
            EventKind::of(&Event::Unknown {
                event_type: "ping".to_string()
            }),
            EventKind::Other
        );
    }
}
