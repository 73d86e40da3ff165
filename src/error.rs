//! Unified error type.

use std::net::SocketAddr;

use thiserror::Error;

/// Infrastructure failures surfaced by marquee.
///
/// Application-level outcomes (unknown movie, malformed form) are expressed
/// as HTTP [`Response`](crate::Response) values, not as `Error`s. This type
/// only covers what can stop the process: binding the listener.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
