use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use storycase_cli::config::{Cli, Command};
use storycase_cli::session::SessionEnd;
use storycase_cli::{generate, preflight, session};
use storycase_client::BlockingGenerator;
use tracing::info;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.model.to_model_config();
    info!("model: {} (temperature {})", config.model, config.temperature);

    let generator =
        BlockingGenerator::openai(config).context("failed to create async runtime")?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        None => {
            let mut stdin = io::stdin().lock();
            match session::run(&generator, &mut stdin, &mut stdout)? {
                SessionEnd::Quit => Ok(ExitCode::SUCCESS),
                SessionEnd::Fatal(_) => Ok(ExitCode::FAILURE),
            }
        }
        Some(Command::Generate(args)) => {
            let story = generate::load_story(&args)?;
            generate::run(&generator, &args, &story, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Check) => {
            if preflight::run_all(&generator, &mut stdout)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
