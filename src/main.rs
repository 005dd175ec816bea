//! Storefront command-line front end

use std::{io, process::ExitCode};

use anyhow::Result;
use tracing::error;

use storefront::catalog::Catalog;

use crate::config::{Command, Config};

mod commands;
mod config;
mod logging;

/// Storefront entry point
pub fn main() -> ExitCode {
    let config = Config::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = logging::init_subscriber(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::storefront()?,
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    match config.command {
        Command::Catalog => commands::catalog(&catalog, handle),
        Command::Checkout { add, remove } => commands::checkout(catalog, &add, &remove, handle),
    }
}
