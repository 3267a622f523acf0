use anyhow::{Context, Result};
use serde::Serialize;

use crate::inventory::types::Inventory;

pub const JOB_NAME: &str = "node_exporter_homelab";
pub const ENVIRONMENT: &str = "homelab";
pub const DEFAULT_PORT: u16 = 9100;

/// One entry of a Prometheus `scrape_configs:` list. Field order is the
/// order keys are written in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeConfig {
    pub job_name: String,
    pub static_configs: Vec<StaticConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticConfig {
    pub targets: Vec<String>,
    pub labels: Labels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labels {
    pub instance: String,
    pub environment: String,
}

/// Map every non-loopback host to a `address:port` target, keeping inventory order.
pub fn map_targets(inventory: &Inventory, port: u16) -> ScrapeConfig {
    let static_configs = inventory
        .hosts
        .iter()
        .filter(|host| {
            if host.is_loopback() {
                tracing::debug!(host = %host.name, "skipping loopback host");
                return false;
            }
            true
        })
        .map(|host| StaticConfig {
            targets: vec![format!("{}:{port}", host.effective_host())],
            labels: Labels {
                instance: host.name.clone(),
                environment: ENVIRONMENT.to_string(),
            },
        })
        .collect::<Vec<_>>();

    tracing::debug!(targets = static_configs.len(), "mapped scrape targets");

    ScrapeConfig {
        job_name: JOB_NAME.to_string(),
        static_configs,
    }
}

/// Render as a one-element YAML list, ready to paste under `scrape_configs:`.
pub fn render(config: &ScrapeConfig) -> Result<String> {
    serde_yaml::to_string(std::slice::from_ref(config)).context("Failed to serialize scrape config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::parse_inventory;
    use crate::inventory::types::Host;

    fn inventory(content: &str) -> Inventory {
        parse_inventory(content).unwrap()
    }

    #[test]
    fn test_localhost_excluded() {
        let inv = inventory(
            r#"{"_meta": {"hostvars": {"web1": {"ansible_host": "10.0.0.5"}, "localhost": {}}}}"#,
        );
        let config = map_targets(&inv, 9100);
        assert_eq!(
            config.static_configs,
            vec![StaticConfig {
                targets: vec!["10.0.0.5:9100".to_string()],
                labels: Labels {
                    instance: "web1".to_string(),
                    environment: "homelab".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_loopback_excluded_regardless_of_vars() {
        let inv = inventory(
            r#"{"_meta": {"hostvars": {
                "127.0.0.1": {"ansible_host": "192.168.1.50"},
                "localhost": {"ansible_connection": "local"}
            }}}"#,
        );
        assert!(map_targets(&inv, 9100).static_configs.is_empty());
    }

    #[test]
    fn test_empty_inventory() {
        let config = map_targets(&Inventory::new(), DEFAULT_PORT);
        assert_eq!(config.job_name, "node_exporter_homelab");
        assert!(config.static_configs.is_empty());

        let config = map_targets(&inventory(r#"{"all": {}}"#), DEFAULT_PORT);
        assert!(config.static_configs.is_empty());
    }

    #[test]
    fn test_address_and_port() {
        let inv = inventory(
            r#"{"_meta": {"hostvars": {
                "nas": {"ansible_host": "nas.lan"},
                "pi": {},
                "router": {"ansible_host": ""}
            }}}"#,
        );
        let config = map_targets(&inv, 9182);
        let targets: Vec<&str> = config
            .static_configs
            .iter()
            .map(|c| c.targets[0].as_str())
            .collect();
        assert_eq!(targets, vec!["nas.lan:9182", "pi:9182", "router:9182"]);

        for entry in &config.static_configs {
            assert_eq!(entry.targets.len(), 1);
            assert_eq!(entry.labels.environment, "homelab");
        }
    }

    #[test]
    fn test_instance_label_is_hostname_verbatim() {
        let mut inv = Inventory::new();
        let mut host = Host::new("Web-01.Example.COM");
        host.ansible_host = Some("10.1.1.1".to_string());
        inv.hosts.push(host);

        let config = map_targets(&inv, DEFAULT_PORT);
        assert_eq!(config.static_configs[0].labels.instance, "Web-01.Example.COM");
        assert_eq!(config.static_configs[0].targets, vec!["10.1.1.1:9100"]);
    }

    #[test]
    fn test_render_yaml() {
        let inv = inventory(
            r#"{"_meta": {"hostvars": {"web1": {"ansible_host": "10.0.0.5"}, "web2": {}}}}"#,
        );
        let yaml = render(&map_targets(&inv, 9100)).unwrap();
        let expected = "\
- job_name: node_exporter_homelab
  static_configs:
  - targets:
    - 10.0.0.5:9100
    labels:
      instance: web1
      environment: homelab
  - targets:
    - web2:9100
    labels:
      instance: web2
      environment: homelab
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_render_empty() {
        let yaml = render(&map_targets(&Inventory::new(), 9100)).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let list = value.as_sequence().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["job_name"].as_str(), Some(JOB_NAME));
        assert_eq!(list[0]["static_configs"].as_sequence().map(|s| s.len()), Some(0));
    }
}
