//! Broker endpoint and topic prefix configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where the broker lives and which topics belong to us.
///
/// Every field has a default pointing at the production Bemfa API, so a
/// partial file or a single environment variable is enough to override one
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Topics not starting with this are never read or written.
    pub topic_prefix: String,
    pub fetch_path: String,
    pub create_path: String,
    pub rename_path: String,
    pub delete_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apis.bemfa.com".to_string(),
            topic_prefix: "hass".to_string(),
            fetch_path: "/va/alltopic".to_string(),
            create_path: "/va/addtopic".to_string(),
            rename_path: "/va/setName".to_string(),
            delete_path: "/va/deltopic".to_string(),
        }
    }
}

impl ClientConfig {
    /// Default endpoints against another host, e.g. a local mock broker.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn topic_prefix(mut self, prefix: &str) -> Self {
        self.topic_prefix = prefix.to_string();
        self
    }

    pub fn fetch_url(&self) -> String {
        self.join(&self.fetch_path)
    }

    pub fn create_url(&self) -> String {
        self.join(&self.create_path)
    }

    pub fn rename_url(&self) -> String {
        self.join(&self.rename_path)
    }

    pub fn delete_url(&self) -> String {
        self.join(&self.delete_path)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Load configuration from `config/bemfa.*` (optional) and `BEMFA_*`
/// environment variables, e.g. `BEMFA_TOPIC_PREFIX=hass`.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/bemfa").required(false))
        .add_source(Environment::with_prefix("BEMFA"))
        .build()?
        .try_deserialize()
}
