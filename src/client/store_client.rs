//! Store client trait for server communication
//!
//! This trait abstracts the command round-trip so workers and the vault
//! seeder can run against any backend, including scripted test doubles.
//!
//! The trait allows different implementations:
//! - `RawConnection`: Direct TCP with custom RESP codec
//! - Test mocks with scripted responses

use crate::utils::{RespEncoder, RespValue};
use std::io;

/// Store operations trait
///
/// Implementations handle the underlying protocol and connection state.
/// Higher-level operations (point queries, vault seeding) are built on top.
pub trait StoreClient {
    /// Execute a command with string arguments
    ///
    /// # Arguments
    /// * `args` - Command and arguments as string slices
    ///
    /// # Example
    /// ```ignore
    /// let response = conn.execute(&["PING"])?;
    /// let response = conn.execute(&["GET", "c:0"])?;
    /// ```
    fn execute(&mut self, args: &[&str]) -> io::Result<RespValue>;

    /// Execute a command with binary arguments
    ///
    /// Needed for commands carrying raw document bytes
    ///
    /// # Arguments
    /// * `args` - Command and arguments as byte slices
    fn execute_binary(&mut self, args: &[&[u8]]) -> io::Result<RespValue>;

    /// Execute a pre-encoded RESP command
    ///
    /// For cases where the caller has already encoded the command.
    /// This is the lowest-level execution method.
    fn execute_encoded(&mut self, encoder: &RespEncoder) -> io::Result<RespValue>;
}

/// Extension trait with common store operations
///
/// These are convenience methods built on top of the base `StoreClient` trait.
pub trait StoreClientExt: StoreClient {
    /// Send PING and verify PONG response
    fn ping(&mut self) -> io::Result<bool> {
        match self.execute(&["PING"])? {
            RespValue::SimpleString(s) => Ok(s == "PONG"),
            _ => Ok(false),
        }
    }

    /// Point read of a single key
    ///
    /// Returns the document bytes, or `None` when the key does not exist.
    /// A missing key is a successful query, not an error.
    fn find_one(&mut self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match self.execute(&["GET", key])? {
            RespValue::BulkString(data) => Ok(Some(data)),
            RespValue::Null => Ok(None),
            RespValue::Error(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unexpected GET response: {:?}", other),
            )),
        }
    }

    /// Send AUTH command
    fn authenticate(&mut self, password: &str, username: Option<&str>) -> io::Result<()> {
        let response = match username {
            Some(user) => self.execute(&["AUTH", user, password])?,
            None => self.execute(&["AUTH", password])?,
        };

        match response {
            RespValue::SimpleString(s) if s == "OK" => Ok(()),
            RespValue::Error(e) => Err(io::Error::new(io::ErrorKind::PermissionDenied, e)),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unexpected AUTH response: {:?}", other),
            )),
        }
    }

    /// Send SELECT command
    fn select_db(&mut self, db: u32) -> io::Result<()> {
        let db_str = db.to_string();
        match self.execute(&["SELECT", &db_str])? {
            RespValue::SimpleString(s) if s == "OK" => Ok(()),
            RespValue::Error(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unexpected SELECT response: {:?}", other),
            )),
        }
    }

    /// Write a document under a key, replacing any existing value
    fn set_document(&mut self, key: &str, document: &[u8]) -> io::Result<()> {
        match self.execute_binary(&[b"SET", key.as_bytes(), document])? {
            RespValue::SimpleString(s) if s == "OK" => Ok(()),
            RespValue::Error(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unexpected SET response: {:?}", other),
            )),
        }
    }

    /// Delete keys, returning the number actually removed
    fn delete_keys(&mut self, keys: &[String]) -> io::Result<i64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut args: Vec<&str> = Vec::with_capacity(keys.len() + 1);
        args.push("DEL");
        args.extend(keys.iter().map(String::as_str));

        match self.execute(&args)? {
            RespValue::Integer(n) => Ok(n),
            RespValue::Error(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unexpected DEL response: {:?}", other),
            )),
        }
    }

    /// Fetch one SCAN page of keys matching a pattern
    ///
    /// Returns the next cursor and the keys on this page. A returned
    /// cursor of 0 means the iteration is complete.
    fn scan_page(&mut self, cursor: u64, pattern: &str, count: u32) -> io::Result<(u64, Vec<String>)> {
        let cursor_str = cursor.to_string();
        let count_str = count.to_string();
        let response = self.execute(&["SCAN", &cursor_str, "MATCH", pattern, "COUNT", &count_str])?;

        let items = match response {
            RespValue::Array(items) if items.len() == 2 => items,
            RespValue::Error(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Unexpected SCAN response: {:?}", other),
                ))
            }
        };

        let mut items = items.into_iter();
        let next = match items.next() {
            Some(RespValue::BulkString(raw)) => std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Invalid SCAN cursor"))?,
            Some(RespValue::Integer(n)) => n as u64,
            _ => return Err(io::Error::new(io::ErrorKind::InvalidData, "Invalid SCAN cursor")),
        };

        let keys = match items.next() {
            Some(RespValue::Array(keys)) => keys
                .into_iter()
                .filter_map(|k| match k {
                    RespValue::BulkString(raw) => String::from_utf8(raw).ok(),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok((next, keys))
    }
}

// Blanket implementation: any StoreClient automatically gets StoreClientExt
impl<T: StoreClient> StoreClientExt for T {}
