//! TTS Engine orchestrator.
//!
//! This module provides the main engine that coordinates between
//! the CLI, the backend and the audio writer to perform TTS operations.

mod tts;

pub use tts::{SynthesisOutput, TTSEngine, TTSError};
