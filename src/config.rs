//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default maximum number of live records
pub const DEFAULT_MAX_DATA_COUNT: usize = 100;
/// Default renewal window in seconds
pub const DEFAULT_DATA_TTL: u64 = 60;
/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of records the store can hold
    pub max_data_count: usize,
    /// Age in seconds after which a fetched record is regenerated
    pub data_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_DATA_COUNT` - Maximum records, must be positive (default: 100)
    /// - `DATA_TTL` - Renewal window in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            max_data_count: parse_var("MAX_DATA_COUNT")
                .filter(|&count| count > 0)
                .unwrap_or(DEFAULT_MAX_DATA_COUNT),
            data_ttl: parse_var("DATA_TTL").unwrap_or(DEFAULT_DATA_TTL),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_data_count: DEFAULT_MAX_DATA_COUNT,
            data_ttl: DEFAULT_DATA_TTL,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_data_count, 100);
        assert_eq!(config.data_ttl, 60);
        assert_eq!(config.server_port, 3000);
    }

    // Single test touches the process environment so parallel tests don't race.
    #[test]
    fn test_config_from_env() {
        env::remove_var("MAX_DATA_COUNT");
        env::remove_var("DATA_TTL");
        env::remove_var("SERVER_PORT");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("MAX_DATA_COUNT", "5");
        env::set_var("DATA_TTL", " 0 ");
        env::set_var("SERVER_PORT", "8080");
        let config = Config::from_env();
        assert_eq!(config.max_data_count, 5);
        assert_eq!(config.data_ttl, 0);
        assert_eq!(config.server_port, 8080);

        env::set_var("MAX_DATA_COUNT", "0");
        env::set_var("DATA_TTL", "soon");
        let config = Config::from_env();
        assert_eq!(config.max_data_count, DEFAULT_MAX_DATA_COUNT);
        assert_eq!(config.data_ttl, DEFAULT_DATA_TTL);

        env::remove_var("MAX_DATA_COUNT");
        env::remove_var("DATA_TTL");
        env::remove_var("SERVER_PORT");
    }
}
