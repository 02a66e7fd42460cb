use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::valuation::{
    ValuationConfig, DEFAULT_CONFIDENCE_CEILING, DEFAULT_CONFIDENCE_FLOOR,
    DEFAULT_REFERENCE_PRICE_PER_M2,
};

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
    pub engine: EngineSettings,
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

        let engine = EngineSettings::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine,
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

/// Valuation-engine dials exposed through the environment, with the
/// documented defaults when unset.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Citywide reference price-per-m² (`APP_BASELINE_PER_M2`).
    pub reference_price_per_m2: f64,
    /// Inclusive confidence bounds (`APP_CONFIDENCE_FLOOR` / `_CEILING`).
    pub confidence_floor: u8,
    pub confidence_ceiling: u8,
    /// Optional CSV listing catalog replacing the built-in seed data
    /// (`APP_CATALOG_CSV`).
    pub catalog_csv: Option<PathBuf>,
}

impl EngineSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let reference_price_per_m2 = match env::var("APP_BASELINE_PER_M2") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value > 0.0)
                .ok_or(ConfigError::InvalidBaseline)?,
            Err(_) => DEFAULT_REFERENCE_PRICE_PER_M2,
        };

        let confidence_floor =
            parse_confidence_bound("APP_CONFIDENCE_FLOOR", DEFAULT_CONFIDENCE_FLOOR)?;
        let confidence_ceiling =
            parse_confidence_bound("APP_CONFIDENCE_CEILING", DEFAULT_CONFIDENCE_CEILING)?;
        if confidence_floor > confidence_ceiling {
            return Err(ConfigError::InvalidConfidenceRange {
                floor: confidence_floor,
                ceiling: confidence_ceiling,
            });
        }

        let catalog_csv = env::var("APP_CATALOG_CSV").ok().map(PathBuf::from);

        Ok(Self {
            reference_price_per_m2,
            confidence_floor,
            confidence_ceiling,
            catalog_csv,
        })
    }

    pub fn valuation_config(&self) -> ValuationConfig {
        ValuationConfig {
            reference_price_per_m2: self.reference_price_per_m2,
            confidence_floor: self.confidence_floor,
            confidence_ceiling: self.confidence_ceiling,
            ..ValuationConfig::default()
        }
    }
}

fn parse_confidence_bound(key: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(ConfigError::InvalidConfidenceBound { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBaseline,
    InvalidConfidenceBound { key: &'static str },
    InvalidConfidenceRange { floor: u8, ceiling: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBaseline => {
                write!(f, "APP_BASELINE_PER_M2 must be a positive number")
            }
            ConfigError::InvalidConfidenceBound { key } => {
                write!(f, "{key} must be an integer percentage between 0 and 100")
            }
            ConfigError::InvalidConfidenceRange { floor, ceiling } => {
                write!(
                    f,
                    "confidence floor {floor} must not exceed ceiling {ceiling}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
