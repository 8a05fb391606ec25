//! CLI module for the Account API
//!
//! Provides the `serve` subcommand that runs the HTTP server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Account API - user account management with JWT authentication
#[derive(Parser)]
#[command(name = "account-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
