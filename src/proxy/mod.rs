//! Proxy pool and the run-scoped proxy cursor
//!
//! The pool is the ordered list of proxy credentials supplied for a batch.
//! The cursor is the single index into that pool shared by every URL of a
//! batch run. It only moves forward, and only when a proxy connection fails.

mod cursor;
mod pool;

pub use cursor::ProxyCursor;
pub use pool::{ProxyCredential, ProxyPool};

use thiserror::Error;

/// Errors raised while building proxy credentials
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Proxy address is empty")]
    EmptyAddress,

    #[error("Invalid proxy address '{ip}': {reason}")]
    InvalidAddress { ip: String, reason: String },
}

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;
