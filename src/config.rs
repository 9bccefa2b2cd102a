use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::routes::{builtin_routes, Route, RouteTable};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default = "builtin_routes")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Seconds to wait for in-flight requests after shutdown is requested
    pub shutdown_grace: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub default_content_type: String,
    pub server_name: String,
}

impl Config {
    /// Load configuration from an optional `config.toml` plus defaults.
    ///
    /// The `PORT` environment variable overrides `server.port`; an
    /// unparseable or zero value falls back to the configured default.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from("config")?;
        cfg.server.port = resolve_port(std::env::var("PORT").ok().as_deref(), cfg.server.port);
        Ok(cfg)
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace", 5)?
            .set_default("http.default_content_type", "text/plain; charset=utf-8")?
            .set_default("http.server_name", "cmdecho/0.1")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Resolve the listening port from a raw `PORT` value.
///
/// Unset, unparseable, or zero values fall back to `default`.
pub fn resolve_port(raw: Option<&str>, default: u16) -> u16 {
    raw.and_then(|v| v.trim().parse::<u16>().ok())
        .filter(|p| *p != 0)
        .unwrap_or(default)
}

/// Shared application state, owned by the entry point and passed to the
/// server loop and request handler.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,

    // Cached config value for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, String> {
        let routes = RouteTable::new(config.routes.clone())?;
        let access_log = config.logging.access_log;

        Ok(Self {
            config,
            routes,
            cached_access_log: Arc::new(AtomicBool::new(access_log)),
        })
    }
}
