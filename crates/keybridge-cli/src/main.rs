//! Keybridge CLI - export issued identities to disk
//!
//! `keybridge export` assembles a credential bundle from key and certificate
//! files and writes it in one of the supported on-disk formats.
//!
//! # Examples
//!
//! ```bash
//! # Single combined identity file (the default format)
//! keybridge export --key id_ed25519 --ssh-cert id-cert.pub --out ~/.keybridge/id
//!
//! # Key/cert/CA triple for a database that requires mutual TLS
//! keybridge export --key server.key --tls-cert server.pem \
//!     --ca-cluster root --tls-ca root-ca.pem --format db --out /etc/db/server
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod export;
mod formats;

/// Keybridge CLI - write issued credentials in client-consumable formats
#[derive(Parser)]
#[command(name = "keybridge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a credential bundle to disk in the requested format
    Export(export::ExportArgs),

    /// List the supported export formats
    Formats,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keybridge=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keybridge=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Formats => formats::list(),
    }
}
