//! Stress workload configuration derived from CLI arguments

use super::cli::{CliArgs, FailurePolicy};
use std::fmt;

/// Resolved server address
#[derive(Debug, Clone)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub password: String,
    pub username: Option<String>,
}

/// Complete workload configuration
#[derive(Debug, Clone)]
pub struct StressConfig {
    // Connection
    pub address: ServerAddress,
    pub auth: Option<AuthConfig>,
    pub dbnum: Option<u32>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,

    // Workload
    pub workers: u32,
    pub key: String,
    pub failure_policy: FailurePolicy,
    pub duration_secs: Option<u64>,

    // Output
    pub quiet: bool,
    pub verbose: bool,
}

impl StressConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        // Validate first
        args.validate()?;

        // Build auth config
        let auth = args.password.as_ref().map(|p| AuthConfig {
            password: p.clone(),
            username: args.username.clone(),
        });

        Ok(Self {
            address: ServerAddress {
                host: args.host.clone(),
                port: args.port,
            },
            auth,
            dbnum: args.dbnum,
            connect_timeout_ms: args.connect_timeout_ms,
            request_timeout_ms: args.request_timeout_ms,

            workers: args.workers,
            key: args.key.clone(),
            failure_policy: args.on_error,
            duration_secs: args.duration_secs,

            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    /// Validate a programmatically built configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("worker count must be at least 1".to_string());
        }
        if self.key.is_empty() {
            return Err("query key must not be empty".to_string());
        }
        if self.duration_secs == Some(0) {
            return Err("duration must be at least 1 second".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let args = CliArgs::parse_from(["test"]);
        let config = StressConfig::from_cli(&args).unwrap();
        assert_eq!(config.address.to_string(), "127.0.0.1:6379");
        assert_eq!(config.workers, 100);
        assert_eq!(config.key, "c:0");
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert!(config.auth.is_none());
    }

    #[test]
    fn test_from_cli_with_auth() {
        let args = CliArgs::parse_from(["test", "-a", "secret", "--user", "admin"]);
        let config = StressConfig::from_cli(&args).unwrap();
        let auth = config.auth.expect("auth config missing");
        assert_eq!(auth.password, "secret");
        assert_eq!(auth.username.as_deref(), Some("admin"));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let args = CliArgs::parse_from(["test"]);
        let mut config = StressConfig::from_cli(&args).unwrap();
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let args = CliArgs::parse_from(["test"]);
        let mut config = StressConfig::from_cli(&args).unwrap();
        config.key.clear();
        assert!(config.validate().is_err());
    }
}
