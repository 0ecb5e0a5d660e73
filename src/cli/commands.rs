use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Without a subcommand the binary serves the HTTP API.
#[derive(Parser, Debug)]
#[command(name = "gazette")]
#[command(version, about = "REST API for themed articles with embedded comments")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dotenv-style file to load before reading the environment
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, value_name = "PATH")]
    pub config: PathBuf,

    /// Address to bind (overrides HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long, short, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// Connect to the database and serve the HTTP API (default)
    #[default]
    Serve,

    /// Print the resolved configuration with secrets redacted
    Config,
}
