mod config;
mod logging;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::config::{AppConfig, CliOverrides};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Hydrus Server - Hydra hypermedia API server
#[derive(Parser)]
#[command(name = "hydrus-server")]
#[command(about = "Hydrus Server - serves a Hydra API documentation as a hypermedia API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address override, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,

    /// Require HTTP Basic authentication on resource routes
    #[arg(long)]
    auth: bool,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and API documentation, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML (if provided) -> 3) env (HYDRUS__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        port: cli.port,
        bind: cli.bind.clone(),
        auth: cli.auth,
        verbose: cli.verbose,
    });

    logging::init(&config.logging)?;

    if cli.print_config {
        println!("{}", config.render()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("checking configuration");
    config.socket_addr()?;
    let state = config
        .hydrus
        .build_state()
        .context("invalid hydrus configuration")?;
    println!(
        "Configuration is valid: {} classes, {} collections served under /{}",
        state.doc.classes().len(),
        state.doc.collections().len(),
        state.doc.api_name()
    );
    println!("{}", config.render()?);
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = config
        .hydrus
        .build_state()
        .context("invalid hydrus configuration")?;
    let app = hydrus::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        api = %config.hydrus.api_name,
        base_url = %config.hydrus.base_url,
        "hydrus server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match signals::shutdown_signal().await {
                Ok(signal) => tracing::info!(%signal, "shutdown requested, draining connections"),
                Err(e) => tracing::error!(error = %e, "signal handling failed, shutting down"),
            }
        })
        .await
        .context("server error")?;

    tracing::info!("hydrus server stopped");
    Ok(())
}
