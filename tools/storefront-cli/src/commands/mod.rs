//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Text to search for in names and descriptions.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only show this category ("all" shows every category).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only show products offered in this size.
    #[arg(short, long)]
    pub size: Option<String>,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Session script (TOML).
    pub script: String,

    /// Stop at the first step that fails instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points to.
    Validate,
}
