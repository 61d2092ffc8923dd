//! Workload orchestration
//!
//! Connects one client per worker, spawns the worker threads, and joins
//! them after shutdown is signaled. Shutdown comes from the duration
//! watchdog, from a fail-fast worker, or from an external caller holding
//! the shared counters.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::counters::StressCounters;
use super::worker::{QueryWorker, WorkerResult};
use crate::client::ConnectionFactory;
use crate::config::{FailurePolicy, StressConfig};
use crate::utils::{Result, StressError};

/// Summary of a completed run
pub struct RunSummary {
    /// Total queries completed across all workers
    pub queries: u64,
    /// Total query errors across all workers
    pub errors: u64,
    /// Wall-clock time from first spawn to last join
    pub elapsed: Duration,
    /// Per-worker results
    pub workers: Vec<WorkerResult>,
}

impl RunSummary {
    /// Number of workers that stopped because a query failed
    pub fn failed_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.failed()).count()
    }
}

/// Read workload generator
pub struct LoadGenerator {
    config: Arc<StressConfig>,
    connection_factory: ConnectionFactory,
    counters: Arc<StressCounters>,
}

impl LoadGenerator {
    /// Create new generator
    pub fn new(config: StressConfig) -> Result<Self> {
        config.validate().map_err(StressError::Config)?;

        let connection_factory = ConnectionFactory {
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            read_timeout: Duration::from_millis(config.request_timeout_ms),
            write_timeout: Duration::from_millis(config.request_timeout_ms),
            auth_password: config.auth.as_ref().map(|a| a.password.clone()),
            auth_username: config.auth.as_ref().and_then(|a| a.username.clone()),
            dbnum: config.dbnum,
        };

        Ok(Self {
            config: Arc::new(config),
            connection_factory,
            counters: Arc::new(StressCounters::new()),
        })
    }

    /// Shared counters, usable as an external stop handle
    ///
    /// Calling `signal_shutdown()` on the returned handle makes every
    /// worker leave its loop after the in-flight query completes.
    pub fn counters(&self) -> Arc<StressCounters> {
        Arc::clone(&self.counters)
    }

    /// Run the workload until shutdown is signaled
    ///
    /// Connects every worker before spawning any of them, so a refused
    /// or misconfigured server fails the run before load starts.
    pub fn run(&self) -> Result<RunSummary> {
        let address = &self.config.address;
        let worker_count = self.config.workers as usize;

        // Connect all workers up front
        info!("connecting {} query workers to {}", worker_count, address);
        let mut connections = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            connections.push(self.connection_factory.create(&address.host, address.port)?);
        }

        // Spawn worker threads
        let mut handles: Vec<thread::JoinHandle<WorkerResult>> =
            Vec::with_capacity(worker_count);
        let start_time = Instant::now();

        for (worker_id, conn) in connections.into_iter().enumerate() {
            let counters = Arc::clone(&self.counters);
            let key = self.config.key.clone();
            let policy = self.config.failure_policy;

            let spawned = thread::Builder::new()
                .name(format!("query-worker-{}", worker_id))
                .spawn(move || QueryWorker::new(worker_id, conn, key, policy).run(&counters));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Drain whatever already started before reporting
                    self.counters.signal_shutdown();
                    for handle in handles {
                        handle.join().ok();
                    }
                    return Err(StressError::Worker(format!(
                        "failed to spawn query worker {}: {}",
                        worker_id, e
                    )));
                }
            }
        }

        info!("{} query workers running against key '{}'", worker_count, self.config.key);

        // Duration watchdog (if configured)
        if let Some(duration_secs) = self.config.duration_secs {
            let counters = Arc::clone(&self.counters);
            let limit = Duration::from_secs(duration_secs);
            thread::spawn(move || {
                let deadline = Instant::now() + limit;
                while Instant::now() < deadline {
                    if counters.is_shutdown() {
                        return;
                    }
                    thread::sleep(Duration::from_millis(50));
                }
                counters.signal_shutdown();
            });
        }

        // Wait for workers to stop
        let mut workers = Vec::with_capacity(handles.len());
        let mut panicked = 0usize;
        for handle in handles {
            match handle.join() {
                Ok(result) => workers.push(result),
                Err(_) => {
                    panicked += 1;
                    self.counters.signal_shutdown();
                }
            }
        }

        let elapsed = start_time.elapsed();

        if panicked > 0 {
            return Err(StressError::Worker(format!(
                "{} query workers panicked",
                panicked
            )));
        }

        let summary = RunSummary {
            queries: self.counters.queries(),
            errors: self.counters.errors(),
            elapsed,
            workers,
        };

        match self.config.failure_policy {
            FailurePolicy::FailFast => {
                if let Some(failed) = summary.workers.iter().find(|w| w.failed()) {
                    let detail = failed.failure.as_deref().unwrap_or("unknown error");
                    return Err(StressError::Worker(format!(
                        "query worker {} failed: {}",
                        failed.worker_id, detail
                    )));
                }
            }
            FailurePolicy::Isolate => {
                let failed = summary.failed_workers();
                if failed > 0 {
                    warn!(
                        "{} of {} workers retired after query failures",
                        failed,
                        summary.workers.len()
                    );
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerAddress, StressConfig};

    fn test_config(host: &str, port: u16) -> StressConfig {
        StressConfig {
            address: ServerAddress {
                host: host.to_string(),
                port,
            },
            auth: None,
            dbnum: None,
            connect_timeout_ms: 200,
            request_timeout_ms: 1000,
            workers: 2,
            key: "c:0".to_string(),
            failure_policy: FailurePolicy::FailFast,
            duration_secs: None,
            quiet: true,
            verbose: false,
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = test_config("127.0.0.1", 6379);
        config.workers = 0;

        match LoadGenerator::new(config) {
            Err(StressError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_run_fails_before_spawn_when_server_unreachable() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let generator = LoadGenerator::new(test_config("127.0.0.1", port)).unwrap();
        let counters = generator.counters();

        match generator.run() {
            Err(StressError::Connection(_)) => {}
            other => panic!("expected connection error, got {:?}", other.map(|_| ())),
        }

        // No worker ever entered its loop
        assert_eq!(counters.started(), 0);
    }
}
