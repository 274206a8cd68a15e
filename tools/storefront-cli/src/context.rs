//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::SessionId;
use storefront_observability::StructuredLogger;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Sample catalog used when no catalog file is configured.
const BUILTIN_CATALOG: &str = include_str!("../catalog.toml");

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Load and validate the configured catalog.
    ///
    /// Relative catalog paths are resolved against the config file's
    /// directory.
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = match &self.config.store.catalog {
            Some(path) => {
                let base = self
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(&self.cwd);
                load_catalog(&resolve(base, path))?
            }
            None => parse_catalog(BUILTIN_CATALOG, false).context("Built-in catalog is invalid")?,
        };

        if catalog.currency != self.config.store.currency {
            self.output.warn(&format!(
                "Catalog is priced in {}, config says {}",
                catalog.currency, self.config.store.currency
            ));
        }

        Ok(catalog)
    }

    /// Create a session logger from the logging config.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        StructuredLogger::new(SessionId::generate())
            .with_component(component)
            .with_min_level(self.config.logging.level)
            .with_format(self.config.logging.format)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

/// Find config file in directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Read a catalog file, TOML or JSON by extension.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let json = path.extension().and_then(|e| e.to_str()) == Some("json");
    parse_catalog(&content, json).with_context(|| format!("Invalid catalog: {}", path.display()))
}

/// Parse and validate a catalog.
pub fn parse_catalog(content: &str, json: bool) -> Result<Catalog> {
    if json {
        return Ok(Catalog::from_json(content)?);
    }
    let catalog: Catalog = toml::from_str(content)?;
    catalog.validate()?;
    Ok(catalog)
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::Currency;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = parse_catalog(BUILTIN_CATALOG, false).unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.currency, Currency::RUB);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".storefront.toml"), "").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(dir.path().join(".storefront.toml"))
        );
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.json"), "{}").unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();

        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join("storefront.toml"))
        );
    }

    #[test]
    fn test_catalog_path_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("items.json"),
            r#"{"currency": "RUB", "products": [{"id": "9", "name": "Scarf",
                "category": "Accessories", "sizes": ["One size"],
                "price": {"amount_cents": 1990, "currency": "RUB"}}]}"#,
        )
        .unwrap();

        let mut config = StorefrontConfig::default();
        config.store.catalog = Some("items.json".to_string());
        let ctx = Context {
            config,
            config_path: Some(dir.path().join("storefront.toml")),
            output: Output::new(false, true),
            cwd: PathBuf::from("/"),
        };

        let catalog = ctx.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "Scarf");
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let duplicate = r#"
currency = "RUB"

[[products]]
id = "1"
name = "A"
category = "X"
sizes = ["M"]
price = { amount_cents = 100, currency = "RUB" }

[[products]]
id = "1"
name = "B"
category = "X"
sizes = ["M"]
price = { amount_cents = 100, currency = "RUB" }
"#;
        assert!(parse_catalog(duplicate, false).is_err());
    }
}
