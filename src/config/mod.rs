//! # Configuration Management Module
//!
//! Runtime configuration for the `rollkit` binary. The in-chat config menu
//! manages per-game settings; this file only covers what the process needs
//! before it can talk to chat at all.
//!
//! ## Configuration Structure
//!
//! - [`ExtensionConfig`] - display name, invocation literal, state namespace
//! - [`StorageConfig`] - where persisted state and the simulated world live
//! - [`LoggingConfig`] - log level and optional log file
//! - `macros` - declared [`MacroDefinition`]s kept in sync at startup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rollkit::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!     println!("Invocation: {}", config.extension.invocation);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [extension]
//! name = "API_NAME"
//! invocation = "!apiCall"
//! state_namespace = "API_NAME"
//!
//! [storage]
//! state_file = "./data/state.json"
//! world_file = "./data/world.json"
//!
//! [logging]
//! level = "info"
//!
//! [[macros]]
//! name = "ApiConfig"
//! action = "!apiCall --config"
//! ```
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::host::macros::MacroDefinition;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Speaker name on chat and menu title.
    pub name: String,
    /// Leading token that marks a chat line as ours, e.g. `!apiCall`.
    pub invocation: String,
    /// Top-level key of this extension's persisted state.
    #[serde(default = "default_namespace")]
    pub state_namespace: String,
}

fn default_namespace() -> String {
    "API_NAME".to_string()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            name: "API_NAME".to_string(),
            invocation: "!apiCall".to_string(),
            state_namespace: default_namespace(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    pub state_file: String,
    /// Snapshot of the simulated host world (players, macros, attributes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extension: ExtensionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub macros: Vec<MacroDefinition>,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values that would make the router unreachable or split oddly.
    pub fn validate(&self) -> Result<()> {
        let inv = &self.extension.invocation;
        if inv.trim().is_empty() {
            return Err(anyhow!("extension.invocation must not be empty"));
        }
        if inv.contains("--") || inv.trim() != inv {
            return Err(anyhow!(
                "extension.invocation '{}' must not contain '--' or surrounding whitespace",
                inv
            ));
        }
        if self.extension.state_namespace.trim().is_empty() {
            return Err(anyhow!("extension.state_namespace must not be empty"));
        }
        if let Some(m) = self.macros.iter().find(|m| m.name.trim().is_empty()) {
            return Err(anyhow!("macro with action '{}' has no name", m.action));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let extension = ExtensionConfig::default();
        let macros = vec![MacroDefinition::new(
            "ApiConfig",
            &format!("{} --config", extension.invocation),
        )];
        Config {
            extension,
            storage: StorageConfig {
                state_file: "./data/state.json".to_string(),
                world_file: Some("./data/world.json".to_string()),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("rollkit.log".to_string()),
            },
            macros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.macros[0].action, "!apiCall --config");
    }

    #[test]
    fn invocation_with_delimiter_is_rejected() {
        let mut config = Config::default();
        config.extension.invocation = "!api --call".into();
        assert!(config.validate().is_err());
        config.extension.invocation = " !api".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_extension_section_uses_defaults() {
        let raw = r#"
            [storage]
            state_file = "s.json"

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.extension, ExtensionConfig::default());
        assert!(config.macros.is_empty());
        assert!(config.storage.world_file.is_none());
    }

    #[tokio::test]
    async fn create_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.extension.invocation, "!apiCall");
        assert_eq!(loaded.macros.len(), 1);
    }
}
