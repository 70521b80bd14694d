use chrono_tz::Tz;
use std::str::FromStr;

use crate::utils::time::parse_timezone;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:data/ledger.db | SQLite database (file or `sqlite::memory:`) |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing level when `RUST_LOG` is unset |
/// | LOG_DIR | - | daily rolling log files go here when set |
/// | BUSINESS_TIMEZONE | America/Sao_Paulo | day bucketing and date ranges |
/// | CACHE_TTL_SECS | 300 | register snapshot cache TTL |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | DB_MAX_CONNECTIONS | 5 | pool size |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub business_timezone: Tz,
    pub cache_ttl_secs: u64,
    pub request_timeout_ms: u64,
    pub db_max_connections: u32,
}

/// Parse an env var, falling back to `default` (with a warning if it was set but invalid)
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(var = name, value = %raw, "Invalid value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails only on an unknown `BUSINESS_TIMEZONE`.
    pub fn from_env() -> anyhow::Result<Self> {
        let tz_name =
            std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".into());
        let business_timezone = parse_timezone(&tz_name)
            .map_err(|e| anyhow::anyhow!("BUSINESS_TIMEZONE: {}", e.message))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/ledger.db".into()),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            business_timezone,
            cache_ttl_secs: env_or("CACHE_TTL_SECS", 300),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
        })
    }

    /// Defaults with an in-memory database, for tests and local experiments
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            business_timezone: chrono_tz::America::Sao_Paulo,
            cache_ttl_secs: 300,
            request_timeout_ms: 30_000,
            db_max_connections: 1,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        // Unique names so parallel tests don't interfere
        unsafe {
            std::env::set_var("LEDGER_TEST_PORT_GARBAGE", "eighty");
            std::env::set_var("LEDGER_TEST_PORT_OK", " 8080 ");
        }
        assert_eq!(env_or::<u16>("LEDGER_TEST_PORT_GARBAGE", 3000), 3000);
        assert_eq!(env_or::<u16>("LEDGER_TEST_PORT_OK", 3000), 8080);
        assert_eq!(env_or::<u64>("LEDGER_TEST_UNSET_VAR", 7), 7);
    }

    #[test]
    fn test_in_memory_defaults() {
        let config = Config::in_memory();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.business_timezone, chrono_tz::America::Sao_Paulo);
    }
}
