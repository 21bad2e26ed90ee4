//! CLI argument definitions and parsing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;

use crate::backend::{
    DEFAULT_API_URL, DEFAULT_INTONATION_SCALE, DEFAULT_PITCH_SCALE, DEFAULT_POST_PHONEME_LENGTH,
    DEFAULT_PRE_PHONEME_LENGTH, DEFAULT_SAMPLING_RATE, DEFAULT_SPEAKER_UUID, DEFAULT_SPEED_SCALE,
    DEFAULT_STYLE_ID, DEFAULT_VOLUME_SCALE, SynthesisRequest,
};

const EXAMPLES: &str = "\
Examples:
  coeiroink-cli -t \"Hello world\" -o output.wav
  coeiroink-cli -t \"こんにちは\" -o greeting.wav --speaker-uuid 3c37646f-3881-5374-2a83-149267990abc --speed-scale 1.2
  coeiroink-cli --list-speakers";

/// Command-line client for the COEIROINK v2 text-to-speech API.
#[derive(Parser, Debug)]
#[command(name = "coeiroink-cli")]
#[command(about = "Synthesize WAV files with a local COEIROINK v2 engine")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Text to synthesize (required unless --list-speakers)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub text: Option<String>,

    /// Output WAV file path (required unless --list-speakers)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Speaker UUID (default: Tsukuyomi-chan)
    #[arg(long, default_value = DEFAULT_SPEAKER_UUID)]
    pub speaker_uuid: String,

    /// Style ID of the speaker
    #[arg(long, default_value_t = DEFAULT_STYLE_ID)]
    pub style_id: i64,

    /// Speaking rate multiplier
    #[arg(long, default_value_t = DEFAULT_SPEED_SCALE)]
    pub speed_scale: f64,

    /// Pitch offset
    #[arg(long, default_value_t = DEFAULT_PITCH_SCALE, allow_negative_numbers = true)]
    pub pitch_scale: f64,

    /// Intonation multiplier
    #[arg(long, default_value_t = DEFAULT_INTONATION_SCALE)]
    pub intonation_scale: f64,

    /// Volume multiplier
    #[arg(long, default_value_t = DEFAULT_VOLUME_SCALE)]
    pub volume_scale: f64,

    /// Silence before the speech, in seconds
    #[arg(long, default_value_t = DEFAULT_PRE_PHONEME_LENGTH)]
    pub pre_phoneme_length: f64,

    /// Silence after the speech, in seconds
    #[arg(long, default_value_t = DEFAULT_POST_PHONEME_LENGTH)]
    pub post_phoneme_length: f64,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLING_RATE)]
    pub output_sampling_rate: u32,

    /// COEIROINK API base URL
    #[arg(long, env = "COEIROINK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// List all available speakers and exit
    #[arg(long)]
    pub list_speakers: bool,

    /// Print the speaker list as JSON
    #[arg(long, requires = "list_speakers")]
    pub json: bool,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<'a> {
    ListSpeakers {
        json: bool,
    },
    Synthesize {
        request: SynthesisRequest,
        output: &'a Path,
    },
}

/// Missing arguments for synthesis.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    #[error("--text is required; use --list-speakers to see available speakers instead")]
    MissingText,

    #[error("--output is required; use --list-speakers to see available speakers instead")]
    MissingOutput,
}

impl Args {
    /// Decide what to do. Listing speakers wins over synthesis.
    pub fn action(&self) -> Result<Action<'_>, ArgsError> {
        if self.list_speakers {
            return Ok(Action::ListSpeakers { json: self.json });
        }

        let text = self
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ArgsError::MissingText)?;
        let output = self
            .output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ArgsError::MissingOutput)?;

        Ok(Action::Synthesize {
            request: self.synthesis_request(text),
            output,
        })
    }

    /// Report an `ArgsError` the way clap reports its own usage errors,
    /// with the usage line and exit code 2.
    pub fn usage_error(err: &ArgsError) -> clap::Error {
        Args::command().error(ErrorKind::MissingRequiredArgument, err)
    }

    /// Build a synthesis request for `text` from the voice and prosody flags.
    pub fn synthesis_request(&self, text: &str) -> SynthesisRequest {
        SynthesisRequest::new(&self.speaker_uuid, text)
            .with_style(self.style_id)
            .with_speed(self.speed_scale)
            .with_pitch(self.pitch_scale)
            .with_intonation(self.intonation_scale)
            .with_volume(self.volume_scale)
            .with_phoneme_lengths(self.pre_phoneme_length, self.post_phoneme_length)
            .with_sampling_rate(self.output_sampling_rate)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
