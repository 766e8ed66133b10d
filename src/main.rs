//! ISE Authorization Profile Importer
//!
//! Reads `AP.csv` from the working directory and creates one Cisco ISE
//! authorization profile per row through the ERS API.
//!
//! # Usage
//! ```bash
//! # Prompts for username, password and PAN address
//! ise-authz-import
//!
//! # Different input file, show the request bodies without submitting
//! ise-authz-import --file profiles.csv --dry-run
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ise_authz_import::config::{DEFAULT_CSV_FILE, DEFAULT_ERS_PORT};
use ise_authz_import::credentials::{prompt_host, Credentials};
use ise_authz_import::{importer, IseClient, IseConfig};

// ============================================================
// CLI Definition
// ============================================================

#[derive(Parser, Debug)]
#[command(name = "ise-authz-import")]
#[command(about = "Bulk-create Cisco ISE authorization profiles from CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file with one authorization profile per row
    #[arg(long, env = "ISE_IMPORT_FILE", default_value = DEFAULT_CSV_FILE)]
    file: PathBuf,

    /// ERS API port on the PAN
    #[arg(long, env = "ISE_ERS_PORT", default_value_t = DEFAULT_ERS_PORT)]
    port: u16,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "ISE_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Print the request bodies without contacting ISE
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================
// Main Entry Point
// ============================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; operator output stays on stdout
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.dry_run {
        info!("Dry run: reading {}", cli.file.display());
        let stats = importer::preview(&cli.file)?;
        println!("\n{}", stats.summary());
        return Ok(());
    }

    let credentials = Credentials::prompt()?;
    let host = prompt_host()?;

    let config = IseConfig::for_host(&host, cli.port)
        .with_timeout(cli.timeout.map(Duration::from_secs));
    let client = IseClient::new(config, &credentials)?;

    let stats = importer::run(&client, &cli.file).await?;
    println!("\n{}", stats.summary());

    Ok(())
}
