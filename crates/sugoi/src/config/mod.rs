use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let store = StoreConfig::from_env()?;
        let site = SiteConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store,
            site,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which share record store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Redis { url: String },
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());
        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => {
                let url = env::var("REDIS_URL").map_err(|_| ConfigError::MissingRedisUrl)?;
                Ok(Self::Redis { url })
            }
            _ => Err(ConfigError::UnknownStoreBackend(backend)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            StoreConfig::Memory => "memory",
            StoreConfig::Redis { .. } => "redis",
        }
    }
}

/// Public identity of the site, used to build absolute share links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub name: String,
    pub url: Url,
}

impl SiteConfig {
    pub const DEFAULT_NAME: &'static str = "Sugoi";
    pub const DEFAULT_URL: &'static str = "https://sugoi.vercel.app";

    fn from_env() -> Result<Self, ConfigError> {
        let name = env::var("SITE_NAME").unwrap_or_else(|_| Self::DEFAULT_NAME.to_string());
        let raw_url = env::var("SITE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());
        let url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidSiteUrl {
            value: raw_url.clone(),
            source,
        })?;

        Ok(Self { name, url })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            url: Url::parse(Self::DEFAULT_URL).expect("default site url is valid"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownStoreBackend(String),
    MissingRedisUrl,
    InvalidSiteUrl { value: String, source: url::ParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownStoreBackend(value) => {
                write!(f, "STORE_BACKEND '{value}' is not one of: memory, redis")
            }
            ConfigError::MissingRedisUrl => {
                write!(f, "REDIS_URL is required when STORE_BACKEND=redis")
            }
            ConfigError::InvalidSiteUrl { value, .. } => {
                write!(f, "SITE_URL '{value}' must be an absolute URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidSiteUrl { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::UnknownStoreBackend(_)
            | ConfigError::MissingRedisUrl => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "STORE_BACKEND",
            "REDIS_URL",
            "SITE_NAME",
            "SITE_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn redis_backend_requires_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STORE_BACKEND", "redis");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::MissingRedisUrl)
        ));

        env::set_var("REDIS_URL", "redis://127.0.0.1:6379");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.store,
            StoreConfig::Redis {
                url: "redis://127.0.0.1:6379".to_string()
            }
        );
        assert_eq!(config.store.backend_name(), "redis");
        reset_env();
    }

    #[test]
    fn rejects_unknown_backend_and_relative_site_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("STORE_BACKEND", "postgres");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::UnknownStoreBackend(value)) if value == "postgres"
        ));

        reset_env();
        env::set_var("SITE_URL", "/relative");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
        reset_env();
    }
}
