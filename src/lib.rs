//! coeiroink-cli: command-line client for the COEIROINK v2 text-to-speech API.
//!
//! Lists the speakers a local COEIROINK service offers and synthesizes text
//! into WAV files through its HTTP interface.

pub mod audio;
pub mod backend;
pub mod cli;
pub mod engine;
