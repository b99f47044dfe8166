//! Notaxia admin console.
//!
//! Usage:
//!   notaxia-admin login --email you@notaxia.com
//!   notaxia-admin users list --search ada
//!   notaxia-admin thoughts list --status FAILED --limit 25
//!
//! Results go to stdout as JSON; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use notaxia_admin_cli::{Cli, Console, api_config, session_store};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = api_config(&cli)?;
    let store = session_store(&cli)?;
    debug!(api_url = %config.base_url, session_file = %store.path().display(), "starting");

    let mut console = Console::new(config, Arc::new(store))?;
    let output = console.run(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
