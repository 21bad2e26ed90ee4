//! Saving synthesized audio to disk.

mod wav;

pub use wav::{AudioError, WavSummary, write_audio};
