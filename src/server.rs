//! Server runtime for the travel admin backend.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! default admin, the HTTP server and graceful shutdown.

use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{CatalogService, UserService};
use crate::config::AppConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    OrderRepository, ScenicRepository, UserRepository,
};
use crate::infrastructure::{
    init_database, run_migrations, AssetStore, DatabaseConfig, LocalObjectStorage,
};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin if it does not exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use travel_admin::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP listener is bound to.
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connects to the database, prepares storage and services, then starts
    /// serving HTTP in a background task.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        let context_path = app_cfg.server.normalized_context_path();

        info!("Starting travel admin...");

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Storage ────────────────────────────────────────────
        let scenic_images = AssetStore::new(&app_cfg.storage.scenic_image_dir);
        let uploads = AssetStore::new(&app_cfg.storage.upload_dir);
        for store in [&scenic_images, &uploads] {
            tokio::fs::create_dir_all(store.root()).await?;
        }
        let header_base_url = app_cfg.header_base_url();
        let avatars = Arc::new(LocalObjectStorage::new(uploads.clone(), header_base_url.clone()));
        info!(
            scenic_images = %scenic_images.root().display(),
            uploads = %uploads.root().display(),
            "File storage ready"
        );

        // ── Services ───────────────────────────────────────────
        let jwt_config = JwtConfig {
            secret: app_cfg.security.jwt_secret.clone(),
            expiration_hours: app_cfg.security.jwt_expiration_hours,
            issuer: "travel-admin".to_string(),
        };
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let catalog = CatalogService::new(
            Arc::new(ScenicRepository::new(db.clone())),
            Arc::new(OrderRepository::new(db.clone())),
            scenic_images,
        );
        let users = UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            jwt_config,
            avatars,
            uploads,
            header_base_url,
        );

        if opts.create_default_admin {
            let admin = &app_cfg.admin;
            match users
                .ensure_default_admin(&admin.username, &admin.email, &admin.password)
                .await
            {
                Ok(Some(created)) => {
                    info!(username = %created.username, "Default admin created");
                    warn!("Please change the default admin password");
                }
                Ok(None) => {}
                Err(e) => error!("Failed to create default admin: {}", e),
            }
        }

        // ── HTTP server ────────────────────────────────────────
        let router = create_api_router(AppState {
            db: db.clone(),
            catalog: Arc::new(catalog),
            users: Arc::new(users),
            context_path: context_path.clone(),
            started_at: Arc::new(Instant::now()),
        });

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server listening on http://{}{}", local_addr, context_path);
        info!("Swagger UI available at http://{}{}/docs/", local_addr, context_path);

        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("HTTP server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("HTTP server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the HTTP server to stop, then close the database within the
    /// configured shutdown timeout.
    pub async fn wait(self) {
        match self.api_task.await {
            Ok(()) => info!("HTTP server stopped"),
            Err(e) => error!("HTTP server task panicked: {}", e),
        }

        let db = self.db;
        self.shutdown
            .cleanup_within_timeout(|| async move {
                if let Err(e) = db.close().await {
                    warn!("Error closing database connection: {}", e);
                } else {
                    info!("Database connection closed");
                }
            })
            .await;

        info!("Travel admin shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down travel admin...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config. `RUST_LOG` overrides
/// the configured level.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
