use std::num::NonZeroU16;

use clap::{CommandFactory, Parser};

use crate::config::Config;
use crate::scrape::DEFAULT_PORT;

/// promtargets - Prometheus scrape targets from Ansible inventories
#[derive(Parser, Debug, Clone)]
#[command(
    name = "promtargets",
    version,
    about,
    override_usage = "promtargets <INVENTORY_PATH> [PORT]"
)]
pub struct Args {
    /// Ansible inventory passed to `ansible-inventory -i`
    #[arg(value_name = "INVENTORY_PATH")]
    pub inventory: Option<String>,

    /// node_exporter port (default 9100)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

impl Args {
    /// Usage text printed to stdout when no inventory is given.
    pub fn usage() -> String {
        let usage = Self::command().render_usage().to_string();
        format!("{usage}\nExample: promtargets ansible/inventories/hosts 9100")
    }
}

/// Resolved args after merging CLI + config + defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgs {
    pub inventory: String,
    pub port: u16,
    pub inventory_command: String,
}

impl ResolvedArgs {
    /// `None` when no inventory path was supplied.
    pub fn resolve(args: Args, config: Config) -> Option<Self> {
        Some(Self {
            inventory: args.inventory?,
            port: args
                .port
                .or(config.port.map(NonZeroU16::get))
                .unwrap_or(DEFAULT_PORT),
            inventory_command: config.inventory_command,
        })
    }
}
