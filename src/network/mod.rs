//! Network Module
//!
//! The connection establisher: produces exactly one live TCP connection
//! per invocation.
//!
//! ## Modes
//! - Listen: bind, accept a single peer, close the listener
//! - Connect: optionally bind a source address, dial the destination once
//!
//! Nothing here retries. The first fatal error is returned as is.

mod resolve;
mod listener;
mod dialer;
mod connection;

pub use resolve::{resolve, resolve_source};
pub use listener::{listen_and_accept, Listener};
pub use dialer::resolve_and_dial;
pub use connection::Connection;
