//! coeiroink-cli entry point.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use coeiroink_cli::backend::{Backend, SynthesisRequest, create_backend};
use coeiroink_cli::cli::{
    Action, Args, write_speakers, write_synthesis_result, write_synthesis_start,
};
use coeiroink_cli::engine::TTSEngine;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let action = args
        .action()
        .unwrap_or_else(|err| Args::usage_error(&err).exit());

    let backend = create_backend(&args.api_url, args.timeout())
        .with_context(|| format!("Cannot use API URL '{}'", args.api_url))?;
    debug!(base_url = backend.base_url(), "using COEIROINK engine");
    let engine = TTSEngine::new(backend);

    match action {
        Action::ListSpeakers { json } => list_speakers(&engine, json, &args.api_url),
        Action::Synthesize { request, output } => generate_speech(&engine, &request, output),
    }
}

/// Logs go to stderr so stdout stays clean for listings and JSON.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn list_speakers<B: Backend>(engine: &TTSEngine<B>, json: bool, api_url: &str) -> Result<()> {
    let speakers = engine
        .list_speakers()
        .with_context(|| format!("Failed to list speakers from {api_url}"))?;

    let mut stdout = io::stdout().lock();
    write_speakers(&mut stdout, &speakers, json)?;
    stdout.flush()?;
    Ok(())
}

fn generate_speech<B: Backend>(
    engine: &TTSEngine<B>,
    request: &SynthesisRequest,
    output: &Path,
) -> Result<()> {
    write_synthesis_start(&mut io::stdout(), request)?;

    let result = engine
        .synthesize_to_file(request, output)
        .context("Failed to synthesize speech")?;

    write_synthesis_result(&mut io::stdout(), &result)?;
    Ok(())
}
