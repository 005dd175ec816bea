//! Command-line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storefront command-line front end
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the catalog and check out a cart", long_about = None)]
pub struct Config {
    /// Catalog YAML file (defaults to the built-in storefront catalog)
    #[arg(short, long, global = true, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog by section
    Catalog,

    /// Fill a cart and print the checkout summary
    Checkout {
        /// Product to add; repeat to add more than one unit
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<String>,

        /// Product line to remove after all adds
        #[arg(short, long = "remove", value_name = "ID")]
        remove: Vec<String>,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable, single line
    Compact,

    /// Structured JSON
    Json,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
