//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Optimizer server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Instance name used in structured log events
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Directory scanned for *.rule.json documents at startup
    #[serde(default = "default_rules_dir")]
    pub rules_dir: String,

    /// Optional JSON inventory fixture standing in for provider SDK clients
    #[serde(default)]
    pub inventory_file: Option<String>,
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "optimizer".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_rules_dir() -> String {
    "rules".to_string()
}

impl ServerConfig {
    /// Load configuration from the environment (`OPTIMIZER_*` variables)
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("OPTIMIZER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            instance_name: default_instance_name(),
            api_port: default_api_port(),
            rules_dir: default_rules_dir(),
            inventory_file: None,
        }))
    }
}
