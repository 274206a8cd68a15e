//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::Currency;
use storefront_observability::{LogFormat, LogLevel};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config from TOML or JSON text.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            serde_json::from_str(content).context("Invalid JSON config")
        } else {
            toml::from_str(content).context("Invalid TOML config")
        }
    }
}

/// Store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Store name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency prices are shown in.
    #[serde(default)]
    pub currency: Currency,

    /// Catalog file (TOML or JSON). The built-in sample catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

fn default_store_name() -> String {
    "MONOCHROME".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: Currency::default(),
            catalog: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level written.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Storefront configuration

[store]
name = "{name}"
currency = "RUB"
# catalog = "catalog.toml"

[logging]
level = "info"    # trace | debug | info | warn | error
format = "human"  # human | json
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = StorefrontConfig::parse(&generate_default_config("MONOCHROME"), false).unwrap();
        assert_eq!(config.store.name, "MONOCHROME");
        assert_eq!(config.store.currency, Currency::RUB);
        assert!(config.store.catalog.is_none());
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StorefrontConfig::parse("", false).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_json_config() {
        let config = StorefrontConfig::parse(
            r#"{"store": {"name": "Shop", "currency": "USD", "catalog": "items.json"},
                "logging": {"level": "debug", "format": "json"}}"#,
            true,
        )
        .unwrap();
        assert_eq!(config.store.currency, Currency::USD);
        assert_eq!(config.store.catalog.as_deref(), Some("items.json"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(StorefrontConfig::parse("[logging]\nlevel = \"loud\"\n", false).is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("storefront.toml");
        let json_path = dir.path().join("storefront.json");

        let mut config = StorefrontConfig::default();
        config.store.catalog = Some("catalog.toml".to_string());
        std::fs::write(&toml_path, toml::to_string_pretty(&config).unwrap()).unwrap();
        std::fs::write(&json_path, serde_json::to_string(&config).unwrap()).unwrap();

        assert_eq!(StorefrontConfig::load(&toml_path).unwrap(), config);
        assert_eq!(StorefrontConfig::load(&json_path).unwrap(), config);
        assert!(StorefrontConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
