//! Backend communication with the COEIROINK engine.
//!
//! Provides the wire types and a trait over the two HTTP endpoints the CLI
//! uses, plus the blocking reqwest implementation.

mod client;
mod types;

pub use client::{DEFAULT_API_URL, HttpBackend};
pub use types::{
    BackendError, DEFAULT_INTONATION_SCALE, DEFAULT_PITCH_SCALE, DEFAULT_POST_PHONEME_LENGTH,
    DEFAULT_PRE_PHONEME_LENGTH, DEFAULT_SAMPLING_RATE, DEFAULT_SPEAKER_UUID, DEFAULT_SPEED_SCALE,
    DEFAULT_STYLE_ID, DEFAULT_VOLUME_SCALE, Speaker, Style, SynthesisRequest,
};

use std::time::Duration;

/// Trait for TTS backend communication.
///
/// This trait abstracts the HTTP communication with the engine,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// List the speakers installed on the engine.
    fn speakers(&self) -> Result<Vec<Speaker>, BackendError>;

    /// Synthesize speech from text.
    ///
    /// # Returns
    /// Raw WAV audio data, exactly as sent by the engine
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError>;
}

/// Create a backend for the given API base URL.
pub fn create_backend(api_url: &str, timeout: Duration) -> Result<HttpBackend, BackendError> {
    HttpBackend::new(api_url, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn tsukuyomi() -> Speaker {
        Speaker {
            speaker_name: "つくよみちゃん".to_string(),
            speaker_uuid: DEFAULT_SPEAKER_UUID.to_string(),
            styles: vec![Style {
                style_name: "れいせい".to_string(),
                style_id: 0,
            }],
            version: Some("1.0.1".to_string()),
        }
    }

    // ===========================================
    // Backend trait tests with mocks
    // ===========================================

    #[test]
    fn test_mock_backend_speakers() {
        let mut mock = MockBackend::new();

        mock.expect_speakers()
            .times(1)
            .returning(|| Ok(vec![tsukuyomi()]));

        let speakers = mock.speakers().unwrap();
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].speaker_uuid, DEFAULT_SPEAKER_UUID);
    }

    #[test]
    fn test_mock_backend_synthesize() {
        let mut mock = MockBackend::new();

        mock.expect_synthesize()
            .withf(|req| req.text == "こんにちは" && req.style_id == 2)
            .times(1)
            .returning(|_| Ok(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec()));

        let request = SynthesisRequest::new(DEFAULT_SPEAKER_UUID, "こんにちは").with_style(2);

        let audio = mock.synthesize(&request).unwrap();
        assert!(audio.starts_with(b"RIFF"));
    }

    // ===========================================
    // URL handling
    // ===========================================

    #[test]
    fn test_create_backend_default_url() {
        let backend = create_backend(DEFAULT_API_URL, TIMEOUT).unwrap();
        assert_eq!(backend.base_url(), "http://127.0.0.1:50032/");
        assert_eq!(
            backend.endpoint("v1/speakers").unwrap().as_str(),
            "http://127.0.0.1:50032/v1/speakers"
        );
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let backend = create_backend("http://localhost:50032", TIMEOUT).unwrap();
        assert_eq!(
            backend.endpoint("v1/synthesis").unwrap().as_str(),
            "http://localhost:50032/v1/synthesis"
        );
    }

    #[test]
    fn test_endpoint_relative_to_path_prefix() {
        let with_slash = create_backend("http://tts.local/coeiroink/", TIMEOUT).unwrap();
        assert_eq!(
            with_slash.endpoint("v1/speakers").unwrap().as_str(),
            "http://tts.local/coeiroink/v1/speakers"
        );

        let without_slash = create_backend("http://tts.local/coeiroink", TIMEOUT).unwrap();
        assert_eq!(
            without_slash.endpoint("v1/speakers").unwrap().as_str(),
            "http://tts.local/v1/speakers"
        );
    }

    #[test]
    fn test_create_backend_invalid_url() {
        let result = create_backend("not a url", TIMEOUT);
        assert!(matches!(result, Err(BackendError::InvalidUrl { .. })));
    }

    #[test]
    fn test_create_backend_rejects_non_http_scheme() {
        let result = create_backend("ftp://127.0.0.1:50032/", TIMEOUT);
        assert!(matches!(result, Err(BackendError::InvalidUrl { .. })));
    }

    #[test]
    fn test_connection_refused() {
        // Port 1 is reserved and never has a listener in test environments.
        let backend = create_backend("http://127.0.0.1:1/", TIMEOUT).unwrap();
        let result = backend.speakers();
        assert!(matches!(result, Err(BackendError::ConnectionFailed(_))));
    }

    // ===========================================
    // HttpBackend against a stub server
    // ===========================================

    #[tokio::test]
    async fn test_http_speakers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/speakers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "speakerName": "つくよみちゃん",
                    "speakerUuid": DEFAULT_SPEAKER_UUID,
                    "styles": [{"styleName": "れいせい", "styleId": 0, "base64Icon": "AAAA"}],
                    "version": "1.0.1",
                    "base64Portrait": "BBBB"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let speakers = tokio::task::spawn_blocking(move || {
            create_backend(&uri, TIMEOUT).unwrap().speakers()
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(speakers, vec![tsukuyomi()]);
    }

    #[tokio::test]
    async fn test_http_speakers_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/speakers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            create_backend(&uri, TIMEOUT).unwrap().speakers()
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_http_synthesize_sends_json_body() {
        let request = SynthesisRequest::new(DEFAULT_SPEAKER_UUID, "こんにちは")
            .with_speed(1.2)
            .with_sampling_rate(44100);
        let wav = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/synthesis"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "speakerUuid": DEFAULT_SPEAKER_UUID,
                "styleId": 0,
                "text": "こんにちは",
                "speedScale": 1.2,
                "volumeScale": 1.0,
                "prosodyDetail": [],
                "pitchScale": 0.0,
                "intonationScale": 1.0,
                "prePhonemeLength": 0.1,
                "postPhonemeLength": 0.5,
                "outputSamplingRate": 44100
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/wav")
                    .set_body_bytes(wav.clone()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let audio = tokio::task::spawn_blocking(move || {
            create_backend(&uri, TIMEOUT).unwrap().synthesize(&request)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(audio, wav);
    }

    #[tokio::test]
    async fn test_http_synthesize_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/synthesis"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string("{\"detail\":\"speaker not found\"}"),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let request = SynthesisRequest::new("missing-uuid", "text");
            create_backend(&uri, TIMEOUT).unwrap().synthesize(&request)
        })
        .await
        .unwrap();

        match result {
            Err(BackendError::RequestFailed { status, body }) => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert!(body.contains("speaker not found"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }
}
