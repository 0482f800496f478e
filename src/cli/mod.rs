//! CLI module for the Property Listing API
//!
//! - `serve`: run the HTTP API
//! - `token`: mint a development bearer token

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Property Listing API - listings and favourites with a read-through cache
#[derive(Parser)]
#[command(name = "property-listing-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Print a signed JWT for a user
    Token(token::TokenArgs),
}
