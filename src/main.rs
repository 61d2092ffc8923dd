//! valkey-read-stress - fixed-key read stress driver for Valkey/Redis
//!
//! Spawns N workers, each with its own connection, all hammering the
//! same key with point reads until the run is stopped.

use anyhow::Result;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use valkey_read_stress::config::{CliArgs, StressConfig};
use valkey_read_stress::stress::LoadGenerator;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &StressConfig) {
    if config.quiet {
        return;
    }

    println!("valkey-read-stress v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!("Host: {}", config.address);
    println!("Workers: {}, Key: {}", config.workers, config.key);
    println!("On error: {}", config.failure_policy.as_str());
    match config.duration_secs {
        Some(secs) => println!("Duration: {}s", secs),
        None => println!("Duration: until interrupted"),
    }
    println!("====================================\n");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config =
        StressConfig::from_cli(&args).map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Print banner
    print_banner(&config);

    // Create generator (connections are opened in run)
    let generator = LoadGenerator::new(config.clone())?;

    if !config.quiet {
        println!("running read workload with {} workers", config.workers);
    }

    let summary = generator.run()?;

    // Reached only after a clean stop
    if !config.quiet {
        println!("\n====================================");
        println!("WORKLOAD STOPPED");
        println!("====================================");
        println!("Workers: {}", summary.workers.len());
        println!("Queries issued: {}", summary.queries);
        println!("Errors: {}", summary.errors);
        println!("Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
