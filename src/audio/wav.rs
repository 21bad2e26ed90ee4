//! Writing synthesized audio and reading back its WAV header.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while saving audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write audio to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Format details of a WAV payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WavSummary {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub duration_secs: f64,
}

impl WavSummary {
    /// Parse the header of an in-memory WAV file.
    ///
    /// Returns `None` if the bytes are not a WAV file hound understands.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
        let spec = reader.spec();

        // duration() counts frames, i.e. samples per channel.
        let frames = reader.duration();
        let duration_secs = if spec.sample_rate == 0 {
            0.0
        } else {
            f64::from(frames) / f64::from(spec.sample_rate)
        };

        Some(Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            duration_secs,
        })
    }
}

/// Write audio bytes to `path`, creating missing parent directories.
///
/// An existing file is truncated. The bytes are written as-is.
pub fn write_audio(path: &Path, bytes: &[u8]) -> Result<(), AudioError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AudioError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, bytes).map_err(|source| AudioError::Write {
        path: path.to_path_buf(),
        source,
    })
}
