use crate::pathways::{EngineSettings, NormalizerPolicy};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub pathways: PathwayConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            pathways: PathwayConfig::from_env()?,
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

/// Where the catalog and scoring tables come from, plus per-request budgets.
///
/// `None` paths fall back to the data embedded in the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayConfig {
    pub catalog_path: Option<PathBuf>,
    pub scoring_path: Option<PathBuf>,
    pub top_n: usize,
    pub max_pathways: usize,
    pub max_expansions: usize,
    pub min_age: u8,
    pub max_age: u8,
    pub next_steps_limit: usize,
}

impl Default for PathwayConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            catalog_path: None,
            scoring_path: None,
            top_n: settings.top_n,
            max_pathways: settings.max_pathways,
            max_expansions: settings.max_expansions,
            min_age: settings.normalizer.min_age(),
            max_age: settings.normalizer.max_age(),
            next_steps_limit: settings.next_steps_limit,
        }
    }
}

impl PathwayConfig {
    /// Read the `PATHWAY_*` variables on their own, for commands that never
    /// bind a server.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            catalog_path: env::var_os("PATHWAY_CATALOG_PATH").map(PathBuf::from),
            scoring_path: env::var_os("PATHWAY_SCORING_PATH").map(PathBuf::from),
            top_n: env_number("PATHWAY_TOP_N", defaults.top_n)?,
            max_pathways: env_number("PATHWAY_MAX_PATHWAYS", defaults.max_pathways)?,
            max_expansions: env_number("PATHWAY_MAX_EXPANSIONS", defaults.max_expansions)?,
            min_age: env_number("PATHWAY_MIN_AGE", defaults.min_age)?,
            max_age: env_number("PATHWAY_MAX_AGE", defaults.max_age)?,
            next_steps_limit: env_number("PATHWAY_NEXT_STEPS", defaults.next_steps_limit)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_age > self.max_age {
            return Err(ConfigError::InvalidAgeRange {
                min: self.min_age,
                max: self.max_age,
            });
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "PATHWAY_TOP_N",
            });
        }
        if self.max_pathways == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "PATHWAY_MAX_PATHWAYS",
            });
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "PATHWAY_MAX_EXPANSIONS",
            });
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> Result<EngineSettings, ConfigError> {
        self.validate()?;
        let normalizer = NormalizerPolicy::new(self.min_age, self.max_age).ok_or(
            ConfigError::InvalidAgeRange {
                min: self.min_age,
                max: self.max_age,
            },
        )?;

        Ok(EngineSettings {
            top_n: self.top_n,
            max_pathways: self.max_pathways,
            max_expansions: self.max_expansions,
            next_steps_limit: self.next_steps_limit,
            normalizer,
        })
    }
}

fn env_number<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidAgeRange { min: u8, max: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a positive integer in range")
            }
            ConfigError::InvalidAgeRange { min, max } => write!(
                f,
                "PATHWAY_MIN_AGE ({min}) must not exceed PATHWAY_MAX_AGE ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidAgeRange { .. } => None,
        }
    }
}
