//! Server configuration.
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults,
//! 2. an optional TOML file (`COURIER_CONFIG`, default `courier.toml`),
//! 3. `COURIER__<SECTION>__<KEY>` environment variables, e.g.
//!    `COURIER__SERVER__PORT=9000`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use courier_domain::DEFAULT_HISTORY_LIMIT;
use courier_infrastructure::default_data_dir;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "COURIER_CONFIG";
/// Configuration file read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "courier.toml";

const ENV_PREFIX: &str = "COURIER";
const ENV_SEPARATOR: &str = "__";

/// Root settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Listener
    pub server: ServerSettings,
    /// Persisted state
    pub storage: StorageSettings,
    /// Outbound requests
    pub executor: ExecutorSettings,
    /// History log
    pub history: HistorySettings,
    /// Log output
    pub logging: LoggingSettings,
    /// Response rendering
    pub api: ApiSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the JSON documents. Defaults to the platform data
    /// directory.
    pub data_dir: Option<PathBuf>,
}

/// Request executor settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorSettings {
    /// Timeout applied when a request gives none.
    pub default_timeout_ms: u64,
    /// User agent sent unless a request sets its own.
    pub user_agent: Option<String>,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            default_timeout_ms: 30_000,
            user_agent: None,
        }
    }
}

/// History settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Number of entries kept.
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Response rendering settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Whether error responses carry the `error` detail field.
    pub expose_error_details: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            expose_error_details: cfg!(debug_assertions),
        }
    }
}

impl Settings {
    /// Loads settings from the file named by `COURIER_CONFIG` (or
    /// `courier.toml`) and the environment.
    ///
    /// # Errors
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Loads settings from `path` (skipped if missing) and the environment.
    ///
    /// # Errors
    /// Returns an error if a source is malformed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the listener address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    /// Returns the data directory, falling back to the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}
