//! Client connection layer

pub mod raw_connection;
pub mod store_client;

pub use raw_connection::{ConnectionFactory, RawConnection};
pub use store_client::{StoreClient, StoreClientExt};
