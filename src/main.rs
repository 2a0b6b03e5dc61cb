//! Travel admin server
//!
//! ```sh
//! # Run with default config (~/.config/travel-admin/config.toml)
//! travel-admin
//!
//! # Custom config path and port
//! travel-admin --config /etc/travel-admin/config.toml --port 9090
//!
//! # Validate config without starting
//! travel-admin --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use travel_admin::config::AppConfig;
use travel_admin::server::{init_tracing, ServerHandle, ServerOptions};

/// Administrative backend for the travel booking site.
#[derive(Parser, Debug)]
#[command(
    name = "travel-admin",
    version,
    about = "Administrative backend for the travel booking site",
    long_about = "Admin HTTP API for scenic spots, products, orders and users.\n\n\
                  Default config: ~/.config/travel-admin/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "TRAVEL_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(travel_admin::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file  : {}", config_path.display());
        println!("   HTTP address : {}", config.server.address());
        println!("   Context path : {}", config.server.normalized_context_path());
        println!("   Database     : {}", config.database.connection_url());
        println!("   Scenic images: {}", config.storage.scenic_image_dir.display());
        println!("   Uploads      : {}", config.storage.upload_dir.display());
        println!("   Log level    : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
