//! Storefront CLI - Command line driver for the storefront catalog and cart.
//!
//! Commands:
//! - `storefront catalog` - List and search products
//! - `storefront categories` - List categories with product counts
//! - `storefront session` - Replay a scripted shopping session
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_observability::{init_tracing, LogLevel};

use commands::{CatalogArgs, ConfigArgs, SessionArgs};

/// Storefront CLI - Browse the catalog and run cart sessions
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Catalog(CatalogArgs),

    /// List categories with product counts
    Categories,

    /// Replay a scripted shopping session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        ctx.config.logging.level
    };
    if let Err(e) = init_tracing(level, ctx.config.logging.format) {
        ctx.output.debug(&e.to_string());
    }

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Categories => commands::catalog::run_categories(&ctx),
        Commands::Session(args) => commands::session::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
