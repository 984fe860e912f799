//! sysver Daemon - deployment reporting and system version lookup
//!
//! The daemon provides:
//! - `POST /api/deploy` to record that a service is at a version
//! - `GET /api/services?systemVersion=N` to list what was live at N
//! - `GET /health` as a liveness check

use clap::Parser;
use sysver_daemon::error::{DaemonError, DaemonResult};
use sysver_daemon::{DaemonConfig, Environment, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// sysver Daemon CLI
#[derive(Parser)]
#[command(name = "sysverd")]
#[command(about = "sysver Daemon - Service and system version tracking", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SYSVER_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "SYSVER_LISTEN_ADDR")]
    listen: Option<String>,

    /// Environment (development, production, test)
    #[arg(short, long, env = "SYSVER_ENVIRONMENT")]
    environment: Option<String>,

    /// Shared secret required on /api routes
    #[arg(long, env = "SYSVER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Log level
    #[arg(long, env = "SYSVER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "SYSVER_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(environment) = &cli.environment {
        config.environment = environment.parse::<Environment>()?;
    }
    if let Some(api_key) = cli.api_key {
        config.auth.api_key = Some(api_key);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
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

    // Print startup banner
    println!(
        r#"
  sysverd - service and system version tracker
  Version: {}
  Environment: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.environment,
        config.server.listen_addr
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
