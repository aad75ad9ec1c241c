mod analyzer;
mod app;
mod cli;
mod config;
mod error;
mod remux;
mod tracks;
mod utils;

use anyhow::Context;
use app::Outcome;
use clap::Parser;
use cli::{Cli, RunOptions};
use config::AppConfig;
use remux::DispositionRewriter;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use utils::{Dependencies, init_logging};

fn main() -> ExitCode {
    // Usage errors exit with 1 like every other failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let loaded = AppConfig::load();
    let debug_file = loaded
        .as_ref()
        .map(|c| c.logging.debug_file)
        .unwrap_or(false);
    let _guard = init_logging(debug_file);
    let config = AppConfig::load_or_default(loaded);
    debug!("Config: {:?}", config);

    match run(cli, &config) {
        Ok(Outcome::Failed(errors)) => {
            for err in &errors {
                eprintln!("Error: {}", err);
            }
            ExitCode::FAILURE
        }
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<Outcome> {
    let options = RunOptions::try_from(cli)?;
    let deps = Dependencies::resolve(&config.tools).context("missing dependency")?;
    let rewriter = DispositionRewriter::new(deps.ffmpeg.clone(), config.remux.space_margin());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = app::run(
        &options,
        &deps,
        &rewriter,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;
    Ok(outcome)
}
