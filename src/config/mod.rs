use crate::maps::AccessToken;
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
    pub map: MapConfig,
    pub rentals: RentalsConfig,
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
        let access_token = env::var("MAPBOX_ACCESS_TOKEN").unwrap_or_default();
        let origin = match env::var("RENTALS_ORIGIN") {
            Ok(raw) => Some(parse_origin(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            map: MapConfig {
                access_token: AccessToken::new(access_token),
            },
            rentals: RentalsConfig { origin },
        })
    }

    /// Origin the rental catalogue is fetched from. Falls back to this
    /// service's own address when `RENTALS_ORIGIN` is unset.
    pub fn rentals_origin(&self) -> Result<Url, ConfigError> {
        match &self.rentals.origin {
            Some(origin) => Ok(origin.clone()),
            None => {
                let addr = self.server.socket_addr()?;
                parse_origin(&format!("http://{addr}"))
            }
        }
    }
}

fn parse_origin(raw: &str) -> Result<Url, ConfigError> {
    let origin = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidOrigin {
        value: raw.to_string(),
        source,
    })?;

    if origin.cannot_be_a_base() {
        return Err(ConfigError::InvalidOrigin {
            value: raw.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }

    Ok(origin)
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Map provider credentials.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub access_token: AccessToken,
}

#[derive(Debug, Clone)]
pub struct RentalsConfig {
    pub origin: Option<Url>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidOrigin { value: String, source: url::ParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidOrigin { value, .. } => {
                write!(f, "RENTALS_ORIGIN '{}' is not an absolute URL", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidOrigin { source, .. } => Some(source),
        }
    }
}
