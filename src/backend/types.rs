//! Backend request/response types.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tsukuyomi-chan, the speaker bundled with every COEIROINK install.
pub const DEFAULT_SPEAKER_UUID: &str = "3c37646f-3881-5374-2a83-149267990abc";

pub const DEFAULT_STYLE_ID: i64 = 0;
pub const DEFAULT_SPEED_SCALE: f64 = 1.0;
pub const DEFAULT_PITCH_SCALE: f64 = 0.0;
pub const DEFAULT_INTONATION_SCALE: f64 = 1.0;
pub const DEFAULT_VOLUME_SCALE: f64 = 1.0;
pub const DEFAULT_PRE_PHONEME_LENGTH: f64 = 0.1;
pub const DEFAULT_POST_PHONEME_LENGTH: f64 = 0.5;
pub const DEFAULT_SAMPLING_RATE: u32 = 24000;

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A voice style offered by a speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub style_name: String,
    pub style_id: i64,
}

/// A speaker as returned by `GET /v1/speakers`.
///
/// Icons and portraits are base64 blobs in the real response; they are
/// dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub speaker_name: String,
    pub speaker_uuid: String,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Speaker {
    /// Render the styles as `name(ID:n), name(ID:n)`.
    pub fn style_summary(&self) -> String {
        self.styles
            .iter()
            .map(|style| format!("{}(ID:{})", style.style_name, style.style_id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Request body for `POST /v1/synthesis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub speaker_uuid: String,
    pub style_id: i64,
    pub text: String,
    pub speed_scale: f64,
    pub volume_scale: f64,
    /// Per-mora prosody overrides. Always sent empty so the service derives
    /// prosody from the text itself.
    #[serde(default)]
    pub prosody_detail: Vec<serde_json::Value>,
    pub pitch_scale: f64,
    pub intonation_scale: f64,
    pub pre_phoneme_length: f64,
    pub post_phoneme_length: f64,
    pub output_sampling_rate: u32,
}

impl SynthesisRequest {
    /// Create a new synthesis request with default prosody.
    pub fn new(speaker_uuid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker_uuid: speaker_uuid.into(),
            style_id: DEFAULT_STYLE_ID,
            text: text.into(),
            speed_scale: DEFAULT_SPEED_SCALE,
            volume_scale: DEFAULT_VOLUME_SCALE,
            prosody_detail: Vec::new(),
            pitch_scale: DEFAULT_PITCH_SCALE,
            intonation_scale: DEFAULT_INTONATION_SCALE,
            pre_phoneme_length: DEFAULT_PRE_PHONEME_LENGTH,
            post_phoneme_length: DEFAULT_POST_PHONEME_LENGTH,
            output_sampling_rate: DEFAULT_SAMPLING_RATE,
        }
    }

    /// Set the style id.
    pub fn with_style(mut self, style_id: i64) -> Self {
        self.style_id = style_id;
        self
    }

    /// Set the speaking rate multiplier.
    pub fn with_speed(mut self, speed_scale: f64) -> Self {
        self.speed_scale = speed_scale;
        self
    }

    pub fn with_pitch(mut self, pitch_scale: f64) -> Self {
        self.pitch_scale = pitch_scale;
        self
    }

    pub fn with_intonation(mut self, intonation_scale: f64) -> Self {
        self.intonation_scale = intonation_scale;
        self
    }

    pub fn with_volume(mut self, volume_scale: f64) -> Self {
        self.volume_scale = volume_scale;
        self
    }

    /// Set leading and trailing silence, in seconds.
    pub fn with_phoneme_lengths(mut self, pre: f64, post: f64) -> Self {
        self.pre_phoneme_length = pre;
        self.post_phoneme_length = post;
        self
    }

    /// Set the output sample rate in Hz.
    pub fn with_sampling_rate(mut self, rate: u32) -> Self {
        self.output_sampling_rate = rate;
        self
    }
}
