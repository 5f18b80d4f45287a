//! Unified error type.

use thiserror::Error;

use crate::store::StoreError;

/// The error type returned by registrar's startup and serving paths.
///
/// Application-level outcomes (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: bad configuration, an unreachable store,
/// binding to a port or accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}
