use std::fs;
use std::num::NonZeroU16;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default node_exporter port when none is given on the command line.
    pub port: Option<NonZeroU16>,
    /// Program invoked as `<inventory_command> -i <path> --list`.
    pub inventory_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: None,
            inventory_command: "ansible-inventory".to_string(),
        }
    }
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs_or_home().map(|p| p.join("config.yml"))
    }

    /// Load `~/.config/promtargets/config.yml`. A missing file means defaults;
    /// a broken one is reported and ignored.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        // Empty or comment-only files carry no mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<serde_yaml::Value>(contents)? {
            serde_yaml::Value::Null => Ok(Self::default()),
            value => serde_yaml::from_value(value),
        }
    }
}

fn dirs_or_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("promtargets"))
}
