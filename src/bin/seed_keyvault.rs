//! Drop and repopulate the demo key vault on a running server

use std::env;
use std::time::Duration;

use valkey_read_stress::client::{RawConnection, StoreClientExt};
use valkey_read_stress::vault::{seed_key_vault, DEFAULT_VAULT_PREFIX};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <host> <port> [prefix]", args[0]);
        std::process::exit(1);
    }

    let host = &args[1];
    let port: u16 = args[2].parse()?;
    let prefix = args.get(3).map_or(DEFAULT_VAULT_PREFIX, String::as_str);

    println!("Connecting to {}:{}...", host, port);
    let mut conn = RawConnection::connect_tcp(host, port, Duration::from_secs(5))?;

    if !conn.ping()? {
        eprintln!("Server did not answer PING");
        std::process::exit(1);
    }

    println!("Dropping vault entries under '{}'...", prefix);
    let report = seed_key_vault(&mut conn, prefix)?;
    println!(
        "Removed {} entries, inserted {} key records",
        report.removed, report.inserted
    );

    println!("Done!");
    Ok(())
}
