//! Configuration module

pub mod cli;
pub mod stress_config;

pub use cli::{CliArgs, FailurePolicy};
pub use stress_config::{AuthConfig, ServerAddress, StressConfig};
