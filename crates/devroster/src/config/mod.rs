use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::developers::{DeveloperLevel, InvertedBounds, LevelBounds, LevelPolicy};

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
    pub storage: StorageConfig,
    pub levels: LevelPolicy,
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

        let database_path = env::var("APP_DATABASE_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig { database_path },
            levels: load_level_policy()?,
        })
    }
}

fn load_level_policy() -> Result<LevelPolicy, ConfigError> {
    Ok(LevelPolicy::new(
        load_bounds(DeveloperLevel::Junior, LevelPolicy::DEFAULT_JUNIOR)?,
        load_bounds(DeveloperLevel::Senior, LevelPolicy::DEFAULT_SENIOR)?,
    ))
}

fn load_bounds(level: DeveloperLevel, defaults: (u32, u32)) -> Result<LevelBounds, ConfigError> {
    let min = read_years(&level_variable(level, "MIN"), defaults.0)?;
    let max = read_years(&level_variable(level, "MAX"), defaults.1)?;
    LevelBounds::new(min, max).map_err(|source| ConfigError::InvertedLevelBounds { level, source })
}

/// `APP_LEVEL_JUNIOR_MIN_YEARS` and friends. NEW has no override.
pub fn level_variable(level: DeveloperLevel, end: &str) -> String {
    format!("APP_LEVEL_{}_{}_YEARS", level.as_str(), end)
}

fn read_years(variable: &str, default: u32) -> Result<u32, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidLevelBound {
                variable: variable.to_string(),
            }),
        Err(_) => Ok(default),
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

/// Where developer records live. `None` keeps them in process memory.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub database_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidLevelBound {
        variable: String,
    },
    InvertedLevelBounds {
        level: DeveloperLevel,
        source: InvertedBounds,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLevelBound { variable } => {
                write!(f, "{variable} must be a non-negative whole number of years")
            }
            ConfigError::InvertedLevelBounds { level, source } => {
                write!(f, "{level} level bounds are inverted: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidLevelBound { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvertedLevelBounds { source, .. } => Some(source),
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_DATABASE_PATH");
        for level in DeveloperLevel::ALL {
            env::remove_var(level_variable(level, "MIN"));
            env::remove_var(level_variable(level, "MAX"));
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
        assert!(config.storage.database_path.is_none());
        assert_eq!(config.levels, LevelPolicy::default());
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
    fn level_bounds_come_from_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LEVEL_JUNIOR_MIN_YEARS", "2");
        env::set_var("APP_LEVEL_JUNIOR_MAX_YEARS", "6");
        env::set_var("APP_DATABASE_PATH", "/tmp/roster.db");

        let config = AppConfig::load().expect("config loads");
        let junior = config.levels.bounds(DeveloperLevel::Junior);
        assert_eq!((junior.min(), junior.max()), (2, 6));
        let senior = config.levels.bounds(DeveloperLevel::Senior);
        assert_eq!((senior.min(), senior.max()), LevelPolicy::DEFAULT_SENIOR);
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/tmp/roster.db"))
        );
        reset_env();
    }

    #[test]
    fn rejects_inverted_level_bounds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LEVEL_SENIOR_MIN_YEARS", "30");
        env::set_var("APP_LEVEL_SENIOR_MAX_YEARS", "20");

        match AppConfig::load() {
            Err(ConfigError::InvertedLevelBounds { level, source }) => {
                assert_eq!(level, DeveloperLevel::Senior);
                assert_eq!(source, InvertedBounds { min: 30, max: 20 });
            }
            other => panic!("expected inverted bounds error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_level_bound() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LEVEL_JUNIOR_MAX_YEARS", "-1");

        match AppConfig::load() {
            Err(ConfigError::InvalidLevelBound { variable }) => {
                assert_eq!(variable, "APP_LEVEL_JUNIOR_MAX_YEARS");
            }
            other => panic!("expected invalid bound error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn new_level_bounds_ignore_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LEVEL_NEW_MIN_YEARS", "0");
        env::set_var("APP_LEVEL_NEW_MAX_YEARS", "5");

        let config = AppConfig::load().expect("config loads");
        let new = config.levels.bounds(DeveloperLevel::New);
        assert_eq!((new.min(), new.max()), (0, 0));
        assert!(config.levels.validate_level(DeveloperLevel::New, 5).is_err());
        assert!(config.levels.validate_level(DeveloperLevel::New, 0).is_ok());
        reset_env();
    }
}
