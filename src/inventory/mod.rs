pub mod types;

use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{Error, Result};
use types::{Host, Inventory};

/// Run `<command> -i <path> --list` and parse what it prints.
pub async fn load_inventory(command: &str, path: &str) -> Result<Inventory> {
    tracing::debug!(command, path, "listing inventory");

    let output = Command::new(command)
        .arg("-i")
        .arg(path)
        .arg("--list")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| Error::source_failure(command, e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            format!("{}", output.status)
        } else {
            format!("{}: {stderr}", output.status)
        };
        return Err(Error::source_failure(command, message));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_inventory(&stdout)
}

/// Parse `ansible-inventory --list` JSON. Only `_meta.hostvars` is read; when
/// it is missing or not an object the inventory is empty.
pub fn parse_inventory(content: &str) -> Result<Inventory> {
    let root: Value = serde_json::from_str(content)?;

    let mut inventory = Inventory::new();
    let hostvars = root
        .get("_meta")
        .and_then(|meta| meta.get("hostvars"))
        .and_then(Value::as_object);

    if let Some(hostvars) = hostvars {
        for (name, vars) in hostvars {
            inventory.hosts.push(Host::from_hostvars(name, vars));
        }
    }

    tracing::debug!(hosts = inventory.len(), "parsed inventory");
    Ok(inventory)
}
