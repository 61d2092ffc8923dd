//! Command-line argument parsing
//!
//! This module defines all CLI arguments for the read stress driver.
//! Arguments are grouped by category for clarity.

use clap::{Parser, ValueEnum};

/// Fixed-key read stress driver for Valkey/Redis
#[derive(Parser, Debug, Clone)]
#[command(name = "valkey-read-stress")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = false)]
#[command(disable_help_flag = true)]
#[allow(clippy::manual_non_exhaustive)]
pub struct CliArgs {
    /// Print help information
    #[arg(long = "help", action = clap::ArgAction::Help)]
    help: (),

    // ===== Connection Options =====
    /// Server hostname
    #[arg(short = 'h', long = "host", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(short = 'p', long = "port", default_value_t = 6379)]
    pub port: u16,

    /// Password for AUTH command
    #[arg(short = 'a', long = "auth")]
    pub password: Option<String>,

    /// Username for ACL AUTH (requires --auth)
    #[arg(long = "user")]
    pub username: Option<String>,

    /// Database number to SELECT
    #[arg(long = "dbnum")]
    pub dbnum: Option<u32>,

    // ===== Workload Parameters =====
    /// Number of query workers, one connection each
    #[arg(short = 'c', long = "workers", default_value_t = 100)]
    pub workers: u32,

    /// Key queried by every worker on every iteration
    #[arg(short = 'k', long = "key", default_value = "c:0")]
    pub key: String,

    /// Worker failure policy
    #[arg(long = "on-error", value_enum, default_value_t = FailurePolicy::FailFast)]
    pub on_error: FailurePolicy,

    // ===== Timing Options =====
    /// Stop after this many seconds (default: run until interrupted)
    #[arg(long = "duration")]
    pub duration_secs: Option<u64>,

    /// Connection timeout in milliseconds
    #[arg(long = "connect-timeout", default_value_t = 5000)]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[arg(long = "request-timeout", default_value_t = 30000)]
    pub request_timeout_ms: u64,

    // ===== Output Options =====
    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// What to do when a worker's query fails
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run on the first failed query
    #[default]
    FailFast,
    /// Retire only the failed worker, keep the others running
    Isolate,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail-fast",
            FailurePolicy::Isolate => "isolate",
        }
    }
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        // Username requires password
        if self.username.is_some() && self.password.is_none() {
            return Err("--user requires --auth to be set".to_string());
        }

        // At least one worker
        if self.workers == 0 {
            return Err("--workers must be at least 1".to_string());
        }

        // Key must not be empty
        if self.key.is_empty() {
            return Err("--key must not be empty".to_string());
        }

        // Duration of zero would stop before any queries
        if self.duration_secs == Some(0) {
            return Err("--duration must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["test"]);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 6379);
        assert_eq!(args.workers, 100);
        assert_eq!(args.key, "c:0");
        assert_eq!(args.on_error, FailurePolicy::FailFast);
        assert_eq!(args.duration_secs, None);
    }

    #[test]
    fn test_workload_args() {
        let args = CliArgs::parse_from([
            "test",
            "--workers",
            "8",
            "--key",
            "hot:item",
            "--on-error",
            "isolate",
            "--duration",
            "30",
        ]);
        assert_eq!(args.workers, 8);
        assert_eq!(args.key, "hot:item");
        assert_eq!(args.on_error, FailurePolicy::Isolate);
        assert_eq!(args.duration_secs, Some(30));
    }

    #[test]
    fn test_validation_user_without_auth() {
        let args = CliArgs::parse_from(["test", "--user", "admin"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_workers() {
        let args = CliArgs::parse_from(["test", "--workers", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_duration() {
        let args = CliArgs::parse_from(["test", "--duration", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_short_flags() {
        let args = CliArgs::parse_from(["test", "-h", "db.internal", "-p", "7000", "-c", "4"]);
        assert_eq!(args.host, "db.internal");
        assert_eq!(args.port, 7000);
        assert_eq!(args.workers, 4);
    }
}
