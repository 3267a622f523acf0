mod cli;
mod config;
mod error;
mod inventory;
mod scrape;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, ResolvedArgs};
use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the YAML.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Args::parse();
    let config = Config::load();

    // Merge: CLI > config > defaults
    let Some(args) = ResolvedArgs::resolve(cli_args, config) else {
        println!("{}", Args::usage());
        std::process::exit(1);
    };

    eprintln!("# Generated Prometheus scrape configuration");
    eprintln!("# From inventory: {}", args.inventory);
    eprintln!("# Node Exporter port: {}", args.port);
    eprintln!("#");

    let inv = inventory::load_inventory(&args.inventory_command, &args.inventory)
        .await
        .with_context(|| format!("Failed to load inventory from: {}", args.inventory))?;

    if inv.is_empty() {
        tracing::warn!("no hosts found in inventory: {}", args.inventory);
    }

    let scrape_config = scrape::map_targets(&inv, args.port);
    let yaml = scrape::render(&scrape_config)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(yaml.as_bytes())
        .context("Failed to write scrape config")?;
    stdout.flush()?;

    eprintln!();
    eprintln!("# Add this to your docker/monitoring-stack/prometheus/prometheus.yml");
    eprintln!("# under the 'scrape_configs:' section");

    Ok(())
}
