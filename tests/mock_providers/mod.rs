//! Mock speech backends
//!
//! - `speech_mock`: in-process `SpeechService` that records calls
//! - `deepgram_mock`: wiremock stubs for the Deepgram REST endpoints

// Allow dead code in test infrastructure - each test binary uses a different subset
#![allow(dead_code)]

pub mod deepgram_mock;
pub mod speech_mock;

pub use deepgram_mock::*;
pub use speech_mock::*;
