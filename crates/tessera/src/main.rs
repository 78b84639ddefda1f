//! Tessera CLI - multi-tenant site builder.
//!
//! Provides commands for:
//! - `serve`: Start the builder/render server
//! - `token`: Mint an operator bearer token
//! - `sites`: Inspect and manage registered sites

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ServeArgs, SitesCommand, TokenArgs};
use output::Output;

/// Tessera - multi-tenant site builder.
#[derive(Parser)]
#[command(name = "tessera", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the builder/render server.
    Serve(ServeArgs),
    /// Mint an operator bearer token.
    Token(TokenArgs),
    /// Site registry commands.
    #[command(subcommand)]
    Sites(SitesCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
        Commands::Token(args) => args.execute(),
        Commands::Sites(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
