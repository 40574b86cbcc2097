//! wiremock helpers for the Deepgram REST surface.

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-deepgram-key";

/// Listen response body in Deepgram's prerecorded format
pub fn listen_body(transcript: &str) -> Value {
    json!({
        "metadata": {
            "request_id": "00000000-0000-0000-0000-000000000000",
            "channels": 1,
            "duration": 0.1
        },
        "results": {
            "channels": [{
                "alternatives": [{
                    "transcript": transcript,
                    "confidence": 0.99,
                    "words": []
                }]
            }]
        }
    })
}

/// Accept any authorized listen request and answer with `transcript`
pub async fn mount_listen(server: &MockServer, transcript: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .and(header("Authorization", format!("Token {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listen_body(transcript)))
        .mount(server)
        .await;
}

/// Accept any authorized speak request and answer with raw PCM
pub async fn mount_speak(server: &MockServer, audio: Vec<u8>) {
    Mock::given(method("POST"))
        .and(path("/v1/speak"))
        .and(header("Authorization", format!("Token {TEST_API_KEY}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "audio/l16")
                .set_body_bytes(audio),
        )
        .mount(server)
        .await;
}

/// Answer every request to `endpoint` with `status` and a Deepgram error body
pub async fn mount_error(server: &MockServer, endpoint: &str, status: u16, err_code: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "err_code": err_code,
            "err_msg": "Mock failure",
            "request_id": "00000000-0000-0000-0000-000000000000"
        })))
        .mount(server)
        .await;
}
