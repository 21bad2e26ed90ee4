//! HTTP client for backend communication.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Response;
use tracing::debug;

use super::Backend;
use super::types::{BackendError, Speaker, SynthesisRequest};

/// Default address of a locally running COEIROINK v2 engine.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:50032/";

const SPEAKERS_PATH: &str = "v1/speakers";
const SYNTHESIS_PATH: &str = "v1/synthesis";
const UNREADABLE_BODY: &str = "<unreadable body>";

/// HTTP-based backend client.
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client for the given API base URL.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = Url::parse(api_url).map_err(|e| BackendError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl {
                url: api_url.to_string(),
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolve an API path against the base URL.
    ///
    /// Resolution is relative, so a base without a trailing slash loses its
    /// last path segment (`http://h/api` + `v1/x` is `http://h/v1/x`).
    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Turn a non-2xx response into an error carrying the body text.
    fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(BackendError::RequestFailed {
            status,
            body: error_body(response.text()),
        })
    }
}

/// Body text of an error response, or a placeholder if it could not be read.
fn error_body<E: std::fmt::Display>(text: Result<String, E>) -> String {
    match text {
        Ok(body) => body.trim().to_string(),
        Err(e) => {
            debug!(error = %e, "failed to read error response body");
            UNREADABLE_BODY.to_string()
        }
    }
}

impl Backend for HttpBackend {
    fn speakers(&self) -> Result<Vec<Speaker>, BackendError> {
        let url = self.endpoint(SPEAKERS_PATH)?;
        debug!(url = url.as_str(), "requesting speaker list");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::check_status(response)?
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError> {
        let url = self.endpoint(SYNTHESIS_PATH)?;
        debug!(
            url = url.as_str(),
            speaker = %request.speaker_uuid,
            style = request.style_id,
            chars = request.text.chars().count(),
            "requesting synthesis"
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::check_status(response)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
