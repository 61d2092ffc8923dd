//! Query worker thread implementation
//!
//! Each worker owns its store connection exclusively. The only
//! synchronization points are the shared atomic counters.

use tracing::warn;

use super::counters::StressCounters;
use crate::client::StoreClient;
use crate::config::FailurePolicy;
use crate::utils::{RespEncoder, RespValue};

/// Result from a worker thread
pub struct WorkerResult {
    /// Worker ID
    pub worker_id: usize,
    /// Queries completed by this worker
    pub queries_issued: u64,
    /// The error that ended the loop, if any
    pub failure: Option<String>,
}

impl WorkerResult {
    /// Whether this worker stopped because a query failed
    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Query worker (runs in dedicated OS thread)
///
/// Issues the same point query in a tight loop until shutdown is
/// signaled or a query fails. The command bytes are encoded once at
/// construction and reused unchanged on every iteration. Replies are
/// checked for the error type and otherwise discarded, so a missing
/// key still counts as a completed query.
pub struct QueryWorker<C> {
    /// Worker ID
    id: usize,

    /// Owned connection (NOT shared with other threads)
    conn: C,

    /// Pre-encoded point query
    command: RespEncoder,

    /// What to do when a query fails
    policy: FailurePolicy,
}

impl<C: StoreClient> QueryWorker<C> {
    /// Create new worker querying `key`
    pub fn new(id: usize, conn: C, key: String, policy: FailurePolicy) -> Self {
        let mut command = RespEncoder::with_capacity(32 + key.len());
        command.encode_command_str(&["GET", &key]);

        Self {
            id,
            conn,
            command,
            policy,
        }
    }

    /// Main worker loop
    ///
    /// Runs until shutdown is signaled. Under `FailFast` the first query
    /// error also signals shutdown so every other worker drains; under
    /// `Isolate` only this worker retires.
    pub fn run(mut self, counters: &StressCounters) -> WorkerResult {
        counters.record_worker_started();

        let mut queries_issued = 0u64;
        let mut failure = None;

        while !counters.is_shutdown() {
            let outcome = match self.conn.execute_encoded(&self.command) {
                Ok(RespValue::Error(message)) => Err(message),
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(()) => {
                    queries_issued += 1;
                    counters.record_query();
                }
                Err(message) => {
                    counters.record_error();
                    match self.policy {
                        FailurePolicy::FailFast => {
                            counters.signal_shutdown();
                        }
                        FailurePolicy::Isolate => {
                            warn!(
                                "Worker {}: query failed, retiring worker: {}",
                                self.id, message
                            );
                        }
                    }
                    failure = Some(message);
                    break;
                }
            }
        }

        counters.record_worker_stopped();

        WorkerResult {
            worker_id: self.id,
            queries_issued,
            failure,
        }
    }
}
