//! Application configuration
//!
//! Loaded from a TOML file, by default `~/.config/travel-admin/config.toml`.
//! A missing file yields the defaults; every section and key is optional.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! context_path = "/admin"
//!
//! [storage]
//! scenic_image_dir = "/srv/travel/scenic"
//! upload_dir = "/srv/travel/upload"
//! domain = "https://travel.example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix every route is mounted under, e.g. `/admin`.
    pub context_path: String,
    /// Seconds allowed for cleanup after the server stops.
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            context_path: String::new(),
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `context_path` with one leading slash and no trailing slash; empty
    /// when routes live at the root.
    pub fn normalized_context_path(&self) -> String {
        let trimmed = self.context_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite database file.
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./travel-admin.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root of `GET /scenicImg/{name}`.
    pub scenic_image_dir: PathBuf,
    /// Avatar directory behind `GET /user/header/{name}`.
    pub upload_dir: PathBuf,
    /// Public origin used to build avatar URLs.
    pub domain: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            scenic_image_dir: PathBuf::from("./data/scenic"),
            upload_dir: PathBuf::from("./data/upload"),
            domain: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-travel-admin-secret".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Bootstrap admin created on first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// `text` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Public prefix of avatars served by `GET /user/header/{name}`.
    pub fn header_base_url(&self) -> String {
        format!(
            "{}{}/user/header",
            self.storage.domain.trim_end_matches('/'),
            self.server.normalized_context_path()
        )
    }
}

/// `~/.config/travel-admin/config.toml`, or `./config.toml` when no config
/// directory is known.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("travel-admin").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
