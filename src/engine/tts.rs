//! TTS Engine implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::{self, AudioError, WavSummary};
use crate::backend::{Backend, BackendError, Speaker, SynthesisRequest};

/// Errors that can occur during TTS operations.
#[derive(Error, Debug)]
pub enum TTSError {
    #[error("Text to synthesize cannot be empty")]
    EmptyText,

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Audio output error: {0}")]
    AudioError(#[from] AudioError),
}

/// Result of a synthesis written to disk.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub path: PathBuf,
    pub bytes_written: usize,
    /// Present when the engine returned a WAV hound could read.
    pub wav: Option<WavSummary>,
}

/// The main TTS engine that drives a backend.
pub struct TTSEngine<B: Backend> {
    backend: B,
}

impl<B: Backend> TTSEngine<B> {
    /// Create a new TTS engine.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// List all speakers the backend offers.
    pub fn list_speakers(&self) -> Result<Vec<Speaker>, TTSError> {
        let speakers = self.backend.speakers()?;
        debug!(count = speakers.len(), "fetched speakers");
        Ok(speakers)
    }

    /// Synthesize speech and return the raw audio bytes.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, TTSError> {
        if request.text.trim().is_empty() {
            return Err(TTSError::EmptyText);
        }

        Ok(self.backend.synthesize(request)?)
    }

    /// Synthesize speech and save it to `output`.
    ///
    /// The file is written even when the payload is not a readable WAV;
    /// the engine is the authority on the format.
    pub fn synthesize_to_file(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> Result<SynthesisOutput, TTSError> {
        let audio_data = self.synthesize(request)?;

        let wav = WavSummary::from_bytes(&audio_data);
        match &wav {
            Some(summary) if summary.sample_rate != request.output_sampling_rate => warn!(
                requested = request.output_sampling_rate,
                actual = summary.sample_rate,
                "engine returned a different sample rate than requested"
            ),
            Some(_) => {}
            None => warn!("response is not a readable WAV file, saving it unchanged"),
        }

        audio::write_audio(output, &audio_data)?;
        info!(path = %output.display(), bytes = audio_data.len(), "audio saved");

        Ok(SynthesisOutput {
            path: output.to_path_buf(),
            bytes_written: audio_data.len(),
            wav,
        })
    }
}
