//! Utility modules

pub mod error;
pub mod resp;

pub use error::{ConnectionError, Result, StressError};
pub use resp::{RespDecoder, RespEncoder, RespValue};
