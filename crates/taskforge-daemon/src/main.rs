//! Taskforge daemon
//!
//! REST coordination service for projects, teams, and tasks:
//! - session-token authentication with per-request role derivation
//! - manual referential-integrity cascades across the five collections
//! - Admin and Project Manager management surfaces

use anyhow::Context;
use clap::Parser;
use taskforge_daemon::{DaemonConfig, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Taskforge daemon CLI
#[derive(Parser)]
#[command(name = "taskforged")]
#[command(about = "Taskforge coordination daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TASKFORGE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "TASKFORGE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "TASKFORGE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "TASKFORGE_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config =
        DaemonConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen.parse().context("invalid listen address")?;
    }

    println!(
        r#"
  _____         _    __
 |_   _|_ _ ___| | _/ _| ___  _ __ __ _  ___
   | |/ _` / __| |/ / |_ / _ \| '__/ _` |/ _ \
   | | (_| \__ \   <|  _| (_) | | | (_| |  __/
   |_|\__,_|___/_|\_\_|  \___/|_|  \__, |\___|
                                   |___/
  Taskforge - Project/Team/Task Coordination
  Version: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    Server::new(config).run().await?;
    Ok(())
}
