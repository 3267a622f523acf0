use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Host {
    pub name: String,
    pub ansible_host: Option<String>,
}

impl Host {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ansible_host: None,
        }
    }

    /// Build a host from its `_meta.hostvars` entry. Only `ansible_host` is
    /// kept; anything other than an object means no variables.
    pub fn from_hostvars(name: &str, hostvars: &Value) -> Self {
        let mut host = Self::new(name);
        if let Some(value) = hostvars.get("ansible_host") {
            // Empty string counts as unset.
            host.ansible_host = value_to_string(value).filter(|v| !v.is_empty());
        }
        host
    }

    /// Address to scrape: `ansible_host` when set, the inventory name otherwise.
    pub fn effective_host(&self) -> &str {
        self.ansible_host.as_deref().unwrap_or(&self.name)
    }

    pub fn is_loopback(&self) -> bool {
        matches!(self.name.as_str(), "localhost" | "127.0.0.1")
    }
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Hosts in the order `ansible-inventory` listed them.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub hosts: Vec<Host>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }
}
