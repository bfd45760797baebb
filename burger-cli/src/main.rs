mod cli;
mod commands;
mod output;
mod session;

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use burger_api::{ApiClient, ApiConfig, RequestState};
use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::{
    cli::Args,
    commands::CommandExecutor,
    output::{error_json, render},
    session::SessionFiles,
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let format = args.output;

    match run(args).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {e:#}");
            let message = format!("{e:#}");
            if let Ok(rendered) = render(&error_json(&message), format) {
                println!("{rendered}");
            }
            process::exit(1);
        }
    }
}

/// Returns whether the command succeeded.
async fn run(args: Args) -> Result<bool> {
    init_logging(args.verbose, args.quiet);

    let mut config = match args.api_url.as_deref() {
        Some(url) => ApiConfig::new(url)?,
        None => ApiConfig::default(),
    };
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let files = SessionFiles::new(
        args.session_dir
            .clone()
            .unwrap_or_else(SessionFiles::default_dir),
    );
    let session = files.load()?;
    let client = ApiClient::new(config, session.clone()).context("Failed to build HTTP client")?;

    let state = CommandExecutor::new(client).execute(args.command).await;

    // Tokens may have been rotated even when the command failed.
    files
        .save(&session)
        .with_context(|| format!("Failed to save session in {}", files.dir().display()))?;

    match state {
        RequestState::Fulfilled(value) => {
            println!("{}", render(&value, args.output)?);
            Ok(true)
        }
        RequestState::Rejected(message) => {
            println!("{}", render(&error_json(&message), args.output)?);
            Ok(false)
        }
        RequestState::Idle | RequestState::Pending => Ok(false),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
}
