// catalog_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// How `tracing` output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'", other))),
    }
  }
}

/// Fixed-window quotas applied per caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
  pub reads_per_window: u32,
  pub writes_per_window: u32,
  pub window: Duration,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      reads_per_window: 100,
      writes_per_window: 20,
      window: Duration::from_secs(60),
    }
  }
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  /// Shared secret for write operations. `None` disables the gate.
  pub api_key: Option<String>,
  pub rate_limit: RateLimitConfig,

  pub seed_db: bool,
  pub log_format: LogFormat,
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url)
      .field("database_max_connections", &self.database_max_connections)
      .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
      .field("rate_limit", &self.rate_limit)
      .field("seed_db", &self.seed_db)
      .field("log_format", &self.log_format)
      .finish()
  }
}

impl AppConfig {
  /// Loads `.env` if present, then reads the process environment.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds the config from any key lookup; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &get_or("SERVER_PORT", "8080"))?;
    let database_url = get_or("DATABASE_URL", "sqlite://catalog.db");
    let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &get_or("DATABASE_MAX_CONNECTIONS", "5"))?;

    let api_key = lookup("API_KEY").map(|k| k.trim().to_string()).filter(|k| !k.is_empty());

    let rate_limit = RateLimitConfig {
      reads_per_window: parse_var("RATE_LIMIT_READS", &get_or("RATE_LIMIT_READS", "100"))?,
      writes_per_window: parse_var("RATE_LIMIT_WRITES", &get_or("RATE_LIMIT_WRITES", "20"))?,
      window: Duration::from_secs(parse_var("RATE_LIMIT_WINDOW_SECS", &get_or("RATE_LIMIT_WINDOW_SECS", "60"))?),
    };
    if rate_limit.window.is_zero() {
      return Err(AppError::Config("RATE_LIMIT_WINDOW_SECS must be greater than zero".to_string()));
    }

    let seed_db = parse_var("SEED_DB", &get_or("SEED_DB", "false"))?;
    let log_format = get_or("LOG_FORMAT", "pretty").parse()?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      api_key,
      rate_limit,
      seed_db,
      log_format,
    })
  }

  /// Config for tests and local experiments: in-memory database, fixed API key.
  pub fn in_memory(api_key: Option<&str>) -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "sqlite::memory:".to_string(),
      database_max_connections: 1,
      api_key: api_key.map(str::to_string),
      rate_limit: RateLimitConfig::default(),
      seed_db: false,
      log_format: LogFormat::Pretty,
    }
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e)))
}
