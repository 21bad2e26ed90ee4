//! CLI argument parsing, validation and output.

mod args;
mod output;

pub use args::{Action, Args, ArgsError};
pub use output::{write_speakers, write_synthesis_result, write_synthesis_start};
