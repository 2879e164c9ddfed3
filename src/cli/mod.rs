//! CLI module for the legal response cache

pub mod serve;

use clap::{Parser, Subcommand};

/// Legal Response Cache - exact and semantic caching of legal answers
#[derive(Parser)]
#[command(name = "legal-response-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cache HTTP server
    Serve,
}
