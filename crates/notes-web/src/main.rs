use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use notes_config::ConfigLoader;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "notes-api")]
#[command(about = "Read-only HTTP API over a folder-organised collection of notes")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to $NOTES_CONFIG, then built-in defaults)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config and NOTES_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config and NOTES_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Default log level when RUST_LOG is not set
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from(cli.log_level).into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting notes API v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().context("Invalid configuration")?;

    notes_web::start_server(&config)
        .await
        .context("Server failed")?;

    Ok(())
}
