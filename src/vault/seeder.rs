//! Key-vault seeding
//!
//! Drops whatever lives under the vault prefix, then writes the three
//! demo records as JSON documents. Runs as a one-off admin step, never
//! as part of the read workload.

use tracing::info;

use super::records::demo_records;
use crate::client::{StoreClient, StoreClientExt};
use crate::utils::Result;

/// Default key prefix for vault records
pub const DEFAULT_VAULT_PREFIX: &str = "datakeys:";

/// Keys requested per SCAN page
const SCAN_BATCH: u32 = 100;

/// Outcome of one seeding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Existing vault entries removed
    pub removed: u64,
    /// Demo records written
    pub inserted: u64,
}

/// Drop all vault entries under `prefix`, then insert the demo records
///
/// The drop is unconditional: an entry under the prefix is replaced even
/// if it happens to match a record being inserted.
pub fn seed_key_vault<C: StoreClient>(conn: &mut C, prefix: &str) -> Result<SeedReport> {
    let removed = drop_vault(conn, prefix)?;
    info!("removed {} vault entries under '{}'", removed, prefix);

    let mut inserted = 0u64;
    for record in &demo_records() {
        let key = format!("{}{}", prefix, record.id);
        let document = serde_json::to_vec(record)?;
        conn.set_document(&key, &document)?;
        inserted += 1;
    }
    info!("inserted {} vault records under '{}'", inserted, prefix);

    Ok(SeedReport { removed, inserted })
}

/// Delete every key under the prefix, one SCAN page at a time
fn drop_vault<C: StoreClient>(conn: &mut C, prefix: &str) -> Result<u64> {
    let pattern = format!("{}*", prefix);
    let mut cursor = 0u64;
    let mut removed = 0u64;

    loop {
        let (next, keys) = conn.scan_page(cursor, &pattern, SCAN_BATCH)?;
        if !keys.is_empty() {
            removed += conn.delete_keys(&keys)? as u64;
        }
        cursor = next;
        if cursor == 0 {
            break;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{RespEncoder, RespValue};
    use std::io;

    struct RecordingStore {
        responses: Vec<RespValue>,
        call_count: usize,
        commands: Vec<Vec<String>>,
    }

    impl RecordingStore {
        fn new(responses: Vec<RespValue>) -> Self {
            Self {
                responses,
                call_count: 0,
                commands: Vec::new(),
            }
        }

        fn next_response(&mut self) -> io::Result<RespValue> {
            if self.call_count < self.responses.len() {
                let resp = self.responses[self.call_count].clone();
                self.call_count += 1;
                Ok(resp)
            } else {
                Err(io::Error::new(io::ErrorKind::Other, "No more responses"))
            }
        }
    }

    impl StoreClient for RecordingStore {
        fn execute(&mut self, args: &[&str]) -> io::Result<RespValue> {
            self.commands
                .push(args.iter().map(|s| s.to_string()).collect());
            self.next_response()
        }

        fn execute_binary(&mut self, args: &[&[u8]]) -> io::Result<RespValue> {
            self.commands.push(
                args.iter()
                    .map(|a| String::from_utf8_lossy(a).into_owned())
                    .collect(),
            );
            self.next_response()
        }

        fn execute_encoded(&mut self, _encoder: &RespEncoder) -> io::Result<RespValue> {
            self.next_response()
        }
    }

    fn scan_reply(cursor: &str, keys: &[&str]) -> RespValue {
        RespValue::Array(vec![
            RespValue::BulkString(cursor.as_bytes().to_vec()),
            RespValue::Array(
                keys.iter()
                    .map(|k| RespValue::BulkString(k.as_bytes().to_vec()))
                    .collect(),
            ),
        ])
    }

    fn ok() -> RespValue {
        RespValue::SimpleString("OK".to_string())
    }

    #[test]
    fn test_seed_over_existing_entries() {
        let mut store = RecordingStore::new(vec![
            scan_reply("0", &["datakeys:old1", "datakeys:old2"]),
            RespValue::Integer(2),
            ok(),
            ok(),
            ok(),
        ]);

        let report = seed_key_vault(&mut store, DEFAULT_VAULT_PREFIX).unwrap();
        assert_eq!(report, SeedReport { removed: 2, inserted: 3 });

        assert_eq!(
            store.commands[0],
            vec!["SCAN", "0", "MATCH", "datakeys:*", "COUNT", "100"]
        );
        assert_eq!(store.commands[1], vec!["DEL", "datakeys:old1", "datakeys:old2"]);

        // One SET per demo record, keyed by prefix + uuid
        let records = demo_records();
        for (i, record) in records.iter().enumerate() {
            let set = &store.commands[2 + i];
            assert_eq!(set[0], "SET");
            assert_eq!(set[1], format!("datakeys:{}", record.id));

            let doc: serde_json::Value = serde_json::from_str(&set[2]).unwrap();
            assert_eq!(doc["_id"], serde_json::json!(record.id.to_string()));
        }
    }

    #[test]
    fn test_seed_empty_vault_skips_delete() {
        let mut store = RecordingStore::new(vec![scan_reply("0", &[]), ok(), ok(), ok()]);

        let report = seed_key_vault(&mut store, DEFAULT_VAULT_PREFIX).unwrap();
        assert_eq!(report, SeedReport { removed: 0, inserted: 3 });

        // SCAN straight to SET, no DEL issued
        assert_eq!(store.commands[1][0], "SET");
    }

    #[test]
    fn test_drop_spans_multiple_scan_pages() {
        let mut store = RecordingStore::new(vec![
            scan_reply("5", &["datakeys:a"]),
            RespValue::Integer(1),
            scan_reply("0", &["datakeys:b"]),
            RespValue::Integer(1),
            ok(),
            ok(),
            ok(),
        ]);

        let report = seed_key_vault(&mut store, DEFAULT_VAULT_PREFIX).unwrap();
        assert_eq!(report.removed, 2);

        let scans = store
            .commands
            .iter()
            .filter(|c| c[0] == "SCAN")
            .count();
        assert_eq!(scans, 2);
    }

    #[test]
    fn test_seed_aborts_on_set_error() {
        let mut store = RecordingStore::new(vec![
            scan_reply("0", &[]),
            RespValue::Error("ERR readonly".to_string()),
        ]);

        assert!(seed_key_vault(&mut store, DEFAULT_VAULT_PREFIX).is_err());
    }
}
