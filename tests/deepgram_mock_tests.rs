//! Deepgram REST client tests against a wiremock server.

mod fixtures;
mod mock_providers;

use std::time::Duration;

use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::*;
use mock_providers::*;
use wyoming_deepgram::{DeepgramClient, DeepgramConfig, SpeechError, SpeechService};

fn client_for(server: &MockServer) -> DeepgramClient {
    let config = DeepgramConfig::new(Some(TEST_API_KEY.to_string()), server.uri())
        .with_timeout(Some(Duration::from_secs(5)));
    DeepgramClient::new(config).unwrap()
}

fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// All values recorded for `key` in the first received request's query string.
async fn received_query_values(server: &MockServer, key: &str) -> Vec<String> {
    let requests = server.received_requests().await.unwrap();
    requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

// =============================================================================
// Listen
// =============================================================================

#[tokio::test]
async fn test_transcribe_sends_audio_and_parses_transcript() {
    let server = MockServer::start().await;
    let audio = generate_sine_wave_bytes(MS_100, 440.0, 0.5);

    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .and(header("Authorization", "Token test-deepgram-key"))
        .and(header("Content-Type", "application/octet-stream"))
        .and(query_param("model", "nova-2"))
        .and(query_param("encoding", "linear16"))
        .and(query_param("sample_rate", "16000"))
        .and(query_param("channels", "1"))
        .and(body_bytes(audio.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listen_body("turn on the lights")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let transcript = client
        .transcribe(Bytes::from(audio), SAMPLE_RATE, CHANNELS, "nova-2", &[])
        .await
        .unwrap();

    assert_eq!(transcript, "turn on the lights");
}

#[tokio::test]
async fn test_nova3_boosts_with_keyterm() {
    let server = MockServer::start().await;
    mount_listen(&server, "hey jarvis").await;

    let client = client_for(&server);
    let transcript = client
        .transcribe(
            Bytes::from(generate_silence_bytes(MS_100)),
            SAMPLE_RATE,
            CHANNELS,
            "nova-3",
            &terms(&["Jarvis", "Home Assistant"]),
        )
        .await
        .unwrap();

    assert_eq!(transcript, "hey jarvis");
    assert_eq!(
        received_query_values(&server, "keyterm").await,
        vec!["Jarvis", "Home Assistant"]
    );
    assert!(received_query_values(&server, "keywords").await.is_empty());
}

#[tokio::test]
async fn test_older_models_boost_with_keywords() {
    let server = MockServer::start().await;
    mount_listen(&server, "zigbee").await;

    let client = client_for(&server);
    client
        .transcribe(
            Bytes::from(generate_silence_bytes(MS_100)),
            SAMPLE_RATE,
            CHANNELS,
            "nova-2-general",
            &terms(&["Zigbee"]),
        )
        .await
        .unwrap();

    assert_eq!(received_query_values(&server, "keywords").await, vec!["Zigbee"]);
    assert!(received_query_values(&server, "keyterm").await.is_empty());
}

#[tokio::test]
async fn test_missing_alternatives_yield_empty_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": {},
            "results": { "channels": [] }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let transcript = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await
        .unwrap();

    assert_eq!(transcript, "");
}

#[tokio::test]
async fn test_malformed_listen_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await;

    assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unauthorized_listen_is_authentication_failure() {
    let server = MockServer::start().await;
    mount_error(&server, "/v1/listen", 401, "INVALID_AUTH").await;

    let client = client_for(&server);
    let result = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await;

    match result {
        Err(SpeechError::AuthenticationFailed(message)) => {
            assert!(message.contains("Mock failure"));
        }
        other => panic!("Expected authentication failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_provider_error() {
    let server = MockServer::start().await;
    mount_error(&server, "/v1/listen", 500, "INTERNAL").await;

    let client = client_for(&server);
    let result = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await;

    match result {
        Err(SpeechError::ProviderError { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listen_body("too late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = DeepgramConfig::new(Some(TEST_API_KEY.to_string()), server.uri())
        .with_timeout(Some(Duration::from_millis(200)));
    let client = DeepgramClient::new(config).unwrap();

    let result = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await;

    assert!(matches!(result, Err(SpeechError::Timeout(_))));
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let server = MockServer::start().await;
    mount_listen(&server, "unused").await;
    mount_speak(&server, vec![0u8; 10]).await;

    let client = DeepgramClient::new(DeepgramConfig::new(None, server.uri())).unwrap();

    let listen = client
        .transcribe(Bytes::from_static(&[0u8; 32]), 16000, 1, "nova-2", &[])
        .await;
    let speak = client.synthesize("hello", "aura-asteria-en", 16000).await;

    assert!(matches!(listen, Err(SpeechError::MissingCredential)));
    assert!(matches!(speak, Err(SpeechError::MissingCredential)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Speak
// =============================================================================

#[tokio::test]
async fn test_synthesize_returns_raw_pcm() {
    let server = MockServer::start().await;
    let pcm = generate_sine_wave_bytes(SECOND / 4, 220.0, 0.3);

    Mock::given(method("POST"))
        .and(path("/v1/speak"))
        .and(header("Authorization", "Token test-deepgram-key"))
        .and(query_param("model", "aura-luna-en"))
        .and(query_param("encoding", "linear16"))
        .and(query_param("sample_rate", "22050"))
        .and(query_param("container", "none"))
        .and(body_json(json!({ "text": "Hello. World" })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pcm.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let audio = client
        .synthesize("Hello. World", "aura-luna-en", 22050)
        .await
        .unwrap();

    assert_eq!(audio.as_ref(), pcm.as_slice());
}

#[tokio::test]
async fn test_forbidden_speak_is_authentication_failure() {
    let server = MockServer::start().await;
    mount_error(&server, "/v1/speak", 403, "INSUFFICIENT_PERMISSIONS").await;

    let client = client_for(&server);
    let result = client.synthesize("hello", "aura-asteria-en", 16000).await;

    assert!(matches!(result, Err(SpeechError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_rate_limited_speak_is_provider_error() {
    let server = MockServer::start().await;
    mount_error(&server, "/v1/speak", 429, "TOO_MANY_REQUESTS").await;

    let client = client_for(&server);
    let result = client.synthesize("hello", "aura-asteria-en", 16000).await;

    match result {
        Err(SpeechError::ProviderError { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("Mock failure"));
        }
        other => panic!("Expected provider error, got {other:?}"),
    }
}
