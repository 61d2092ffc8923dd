//! Raw TCP connection for store traffic
//!
//! This module provides direct TCP connections with pre-allocated
//! buffers. Each worker owns one connection exclusively.

use std::io::{self, BufReader, BufWriter, Write};
use std::net::TcpStream;
use std::time::Duration;

use super::store_client::{StoreClient, StoreClientExt};
use crate::utils::{ConnectionError, RespDecoder, RespEncoder, RespValue};

/// Raw connection with split reader/writer halves
pub struct RawConnection {
    writer: BufWriter<TcpStream>,
    reader: BufReader<TcpStream>,
}

impl RawConnection {
    /// Create new TCP connection
    pub fn connect_tcp(
        host: &str,
        port: u16,
        connect_timeout: Duration,
    ) -> Result<Self, ConnectionError> {
        use std::net::ToSocketAddrs;

        let addr_str = format!("{}:{}", host, port);

        // Resolve hostname to socket address
        let addr = addr_str
            .to_socket_addrs()
            .map_err(|e| ConnectionError::ConnectFailed {
                host: host.to_string(),
                port,
                source: e,
            })?
            .next()
            .ok_or_else(|| ConnectionError::ConnectFailed {
                host: host.to_string(),
                port,
                source: io::Error::new(io::ErrorKind::NotFound, "No addresses found"),
            })?;

        let stream = TcpStream::connect_timeout(&addr, connect_timeout).map_err(|e| {
            ConnectionError::ConnectFailed {
                host: host.to_string(),
                port,
                source: e,
            }
        })?;

        // Configure socket
        stream.set_nodelay(true).ok(); // Disable Nagle's algorithm
        stream.set_read_timeout(Some(Duration::from_secs(30))).ok();
        stream.set_write_timeout(Some(Duration::from_secs(30))).ok();

        let writer = BufWriter::with_capacity(
            65536,
            stream
                .try_clone()
                .map_err(|e| ConnectionError::ConnectFailed {
                    host: host.to_string(),
                    port,
                    source: e,
                })?,
        );
        let reader = BufReader::with_capacity(65536, stream);

        Ok(RawConnection { writer, reader })
    }

    /// Write bytes to connection
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    /// Flush write buffer
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Read a single RESP response
    fn read_response(&mut self) -> io::Result<RespValue> {
        let mut decoder = RespDecoder::new(&mut self.reader);
        decoder.decode()
    }

    /// Set read timeout
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)
    }

    /// Set write timeout
    pub fn set_write_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.writer.get_ref().set_write_timeout(timeout)
    }
}

impl StoreClient for RawConnection {
    fn execute(&mut self, args: &[&str]) -> io::Result<RespValue> {
        let mut encoder = RespEncoder::with_capacity(64);
        encoder.encode_command_str(args);
        self.execute_encoded(&encoder)
    }

    fn execute_binary(&mut self, args: &[&[u8]]) -> io::Result<RespValue> {
        let capacity: usize = args.iter().map(|a| a.len() + 16).sum();
        let mut encoder = RespEncoder::with_capacity(capacity);
        encoder.encode_command(args);
        self.execute_encoded(&encoder)
    }

    fn execute_encoded(&mut self, encoder: &RespEncoder) -> io::Result<RespValue> {
        self.write_all(encoder.as_bytes())?;
        self.flush()?;
        self.read_response()
    }
}

/// Connection factory for creating connections with common config
#[derive(Clone)]
pub struct ConnectionFactory {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub auth_password: Option<String>,
    pub auth_username: Option<String>,
    pub dbnum: Option<u32>,
}

impl ConnectionFactory {
    /// Create a new connection to the specified host:port
    pub fn create(&self, host: &str, port: u16) -> Result<RawConnection, ConnectionError> {
        let mut conn = RawConnection::connect_tcp(host, port, self.connect_timeout)?;

        // Set timeouts
        conn.set_read_timeout(Some(self.read_timeout)).ok();
        conn.set_write_timeout(Some(self.write_timeout)).ok();

        // Authenticate if configured
        if let Some(ref password) = self.auth_password {
            conn.authenticate(password, self.auth_username.as_deref())
                .map_err(|e| ConnectionError::AuthFailed(e.to_string()))?;
        }

        // Select database if configured
        if let Some(db) = self.dbnum {
            conn.select_db(db)
                .map_err(|e| ConnectionError::ConnectFailed {
                    host: host.to_string(),
                    port,
                    source: e,
                })?;
        }

        Ok(conn)
    }
}
