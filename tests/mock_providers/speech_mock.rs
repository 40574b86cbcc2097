//! In-process speech service stub that records every call.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use wyoming_deepgram::{SpeechError, SpeechResult, SpeechService};

#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeCall {
    pub audio: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
    pub model: String,
    pub boost_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizeCall {
    pub text: String,
    pub model: String,
    pub output_sample_rate: u32,
}

/// Canned replies; `None` makes the call fail with a provider error.
pub struct RecordingSpeechService {
    transcript: Option<String>,
    audio: Option<Bytes>,
    transcribe_calls: Mutex<Vec<TranscribeCall>>,
    synthesize_calls: Mutex<Vec<SynthesizeCall>>,
}

impl RecordingSpeechService {
    pub fn new(transcript: Option<&str>, audio: Option<Vec<u8>>) -> Self {
        Self {
            transcript: transcript.map(str::to_string),
            audio: audio.map(Bytes::from),
            transcribe_calls: Mutex::new(Vec::new()),
            synthesize_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn transcribing(transcript: &str) -> Self {
        Self::new(Some(transcript), None)
    }

    pub fn synthesizing(audio: Vec<u8>) -> Self {
        Self::new(None, Some(audio))
    }

    pub fn failing() -> Self {
        Self::new(None, None)
    }

    pub fn transcribe_calls(&self) -> Vec<TranscribeCall> {
        self.transcribe_calls.lock().unwrap().clone()
    }

    pub fn synthesize_calls(&self) -> Vec<SynthesizeCall> {
        self.synthesize_calls.lock().unwrap().clone()
    }
}

fn stub_failure() -> SpeechError {
    SpeechError::ProviderError {
        status: 503,
        body: "stub failure".to_string(),
    }
}

#[async_trait]
impl SpeechService for RecordingSpeechService {
    async fn transcribe(
        &self,
        audio: Bytes,
        sample_rate: u32,
        channels: u16,
        model: &str,
        boost_terms: &[String],
    ) -> SpeechResult<String> {
        self.transcribe_calls.lock().unwrap().push(TranscribeCall {
            audio: audio.to_vec(),
            sample_rate,
            channels,
            model: model.to_string(),
            boost_terms: boost_terms.to_vec(),
        });
        self.transcript.clone().ok_or_else(stub_failure)
    }

    async fn synthesize(
        &self,
        text: &str,
        model: &str,
        output_sample_rate: u32,
    ) -> SpeechResult<Bytes> {
        self.synthesize_calls.lock().unwrap().push(SynthesizeCall {
            text: text.to_string(),
            model: model.to_string(),
            output_sample_rate,
        });
        self.audio.clone().ok_or_else(stub_failure)
    }

    fn provider_name(&self) -> &'static str {
        "recording-stub"
    }
}
