//! valkey-read-stress library
//!
//! Fixed-key read stress workload for Valkey/Redis, plus a demo
//! key-vault seeder.

pub mod client;
pub mod config;
pub mod stress;
pub mod utils;
pub mod vault;
