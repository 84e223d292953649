//! Runtime configuration
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binaries) and fall back to defaults suitable for local runs and tests.

use crate::error::AuditorError;
use crate::models::DEFAULT_CREDIT_SCORE;
use crate::Result;
use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;

/// Log filter from `RUST_LOG`, defaulting to `info`
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Load `.env` and install the fmt subscriber.
///
/// `.env` must be loaded first so a `RUST_LOG` set there reaches the filter.
pub fn init_tracing() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditorConfig {
    /// Port the HTTP adapter binds to
    pub port: u16,
    /// Credit score passed to the risk analyst when a session has no profile
    pub default_credit_score: i32,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_credit_score: DEFAULT_CREDIT_SCORE,
        }
    }
}

impl AuditorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AuditorError::ConfigError(format!("Invalid PORT '{}': {}", raw, e))
            })?,
            None => defaults.port,
        };

        let default_credit_score = match lookup("DEFAULT_CREDIT_SCORE") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|e| {
                AuditorError::ConfigError(format!(
                    "Invalid DEFAULT_CREDIT_SCORE '{}': {}",
                    raw, e
                ))
            })?,
            None => defaults.default_credit_score,
        };

        Ok(Self {
            port,
            default_credit_score,
        })
    }
}
