//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use console::Term;
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("name", &ctx.config.store.name);
    ctx.output.kv("currency", ctx.config.store.currency.code());
    ctx.output.kv(
        "catalog",
        ctx.config.store.catalog.as_deref().unwrap_or("(built-in)"),
    );

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", ctx.config.logging.format.as_str());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        let interactive = !ctx.output.is_json() && Term::stdout().is_term();
        let overwrite = interactive
            && Confirm::new()
                .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
                .default(false)
                .interact()?;
        if !overwrite {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
    }

    let name = ctx
        .cwd
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("MONOCHROME");

    fs::write(&config_path, generate_default_config(name))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.store.name.trim().is_empty() {
        errors.push("store.name is required".to_string());
    }

    if ctx.config_path.is_none() {
        warnings.push("no config file found, using defaults".to_string());
    }

    match ctx.catalog() {
        Ok(catalog) => {
            if catalog.is_empty() {
                warnings.push("catalog has no products".to_string());
            }
            if catalog.currency != ctx.config.store.currency {
                errors.push(format!(
                    "store.currency is {} but the catalog is priced in {}",
                    ctx.config.store.currency, catalog.currency
                ));
            }
            ctx.output.debug(&format!(
                "Catalog: {} product(s) in {} categories",
                catalog.len(),
                catalog.categories().len()
            ));
        }
        Err(err) => errors.push(format!("{:#}", err)),
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "name"] => Ok(config.store.name.clone()),
        ["store", "currency"] => Ok(config.store.currency.code().to_string()),
        ["store", "catalog"] => Ok(config
            .store
            .catalog
            .clone()
            .unwrap_or_else(|| "(built-in)".to_string())),
        ["logging", "level"] => Ok(config.logging.level.as_str().to_string()),
        ["logging", "format"] => Ok(config.logging.format.as_str().to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}
