//! Workload orchestration and workers
//!
//! This module provides the multi-threaded read workload system:
//! - StressCounters: Atomic counters for cross-thread synchronization
//! - QueryWorker: Blocking worker issuing one fixed point query per iteration
//! - LoadGenerator: Connects workers, spawns them, joins them

pub mod counters;
pub mod generator;
pub mod worker;

pub use counters::StressCounters;
pub use generator::{LoadGenerator, RunSummary};
pub use worker::{QueryWorker, WorkerResult};
