//! CLI definitions for Wayline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wayline CLI.
#[derive(Parser)]
#[command(name = "wayline")]
#[command(about = "Context propagation interceptors for durable workflow workers")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WAYLINE_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Report whether a dumped JSON payload fits the default codec
    Check {
        /// Path to a JSON document
        file: PathBuf,
    },

    /// Print the metadata carried by a JSON array of call arguments
    Extract {
        /// Path to a JSON array
        file: PathBuf,
    },

    /// List the interceptors the configuration enables
    Interceptors,
}
