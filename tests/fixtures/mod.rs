//! Test Fixtures Module
//!
//! - Audio fixtures (programmatically generated PCM)
//! - Configuration fixtures

// Allow dead code in test fixtures - each test binary uses a different subset
#![allow(dead_code)]

pub mod audio_fixtures;

pub use audio_fixtures::*;

use wyoming_deepgram::ServerConfig;

/// Configuration pointing at `base_url` with a test credential.
pub fn create_test_config(base_url: &str) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.deepgram_api_key = Some("test-deepgram-key".to_string());
    config.deepgram_base_url = base_url.to_string();
    config.request_timeout_seconds = 5;
    config
}
