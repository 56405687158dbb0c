//! CLI module for the Pulseboard API
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Pulseboard API - organization team management service
#[derive(Parser)]
#[command(name = "pulseboard-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
