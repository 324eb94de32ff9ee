use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;

/// Runtime mode selected through `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Log filter applied when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Development => "schoolboard=debug,tower_http=debug,info",
            Self::Production => "info",
            Self::Test => "warn",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err("expected one of development, production, test".to_string()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub environment: Environment,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Validation is eager: the first missing or malformed value aborts loading.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let environment = parse_or_default(&lookup, "APP_ENV", Environment::default())?;
        let host = parse_or_default(&lookup, "HOST", DEFAULT_HOST)?;
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self {
            database_url,
            environment,
            host,
            port,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
    }
}
