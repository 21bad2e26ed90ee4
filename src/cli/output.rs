//! User-facing output for the CLI commands.

use std::io::{self, Write};

use crate::backend::{Speaker, SynthesisRequest};
use crate::engine::SynthesisOutput;

/// Write the speaker listing, or the speakers as pretty JSON.
pub fn write_speakers<W: Write>(out: &mut W, speakers: &[Speaker], json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, speakers)?;
        return writeln!(out);
    }

    if speakers.is_empty() {
        return writeln!(out, "No speakers found.");
    }

    writeln!(out, "Available speakers:")?;
    for speaker in speakers {
        writeln!(out, "  {} (UUID: {})", speaker.speaker_name, speaker.speaker_uuid)?;
        writeln!(out, "    Styles: {}", speaker.style_summary())?;
    }

    Ok(())
}

pub fn write_synthesis_start<W: Write>(out: &mut W, request: &SynthesisRequest) -> io::Result<()> {
    writeln!(out, "Generating speech...")?;
    writeln!(out, "  Speaker: {}", request.speaker_uuid)?;
    writeln!(out, "  Style: {}", request.style_id)?;
    writeln!(out, "  Speed: {:.2}x", request.speed_scale)
}

/// Write where the audio went and, for WAV payloads, its format.
pub fn write_synthesis_result<W: Write>(out: &mut W, result: &SynthesisOutput) -> io::Result<()> {
    writeln!(out, "Audio saved to: {}", result.path.display())?;
    writeln!(out, "  Size: {} bytes", result.bytes_written)?;
    if let Some(wav) = &result.wav {
        writeln!(
            out,
            "  Format: {} Hz, {} ch, {}-bit",
            wav.sample_rate, wav.channels, wav.bits_per_sample
        )?;
        writeln!(out, "  Duration: {:.2}s", wav.duration_secs)?;
    }

    Ok(())
}
