//! Relay Module
//!
//! Moves bytes one way between the connection and a local stream, then
//! closes everything that was opened.
//!
//! ## Direction
//! ```text
//!   listen:   Connection ──────────▶ stdout | output file
//!   connect:  stdin | input file ──▶ Connection
//! ```
//!
//! ## Copy Paths
//! - Bulk: the sink takes the whole source at once (kernel-assisted on Linux)
//! - Buffered: 1 MiB chunks, read then `write_all`
//!
//! The path is picked once per relay, from the sink's `Sink` impl.

mod stream;
mod copy;
mod teardown;

pub use stream::{LocalSink, LocalSource};
pub use copy::{classify_socket_copy_error, relay, RelayError, Sink, BUFFER_SIZE};
pub use teardown::{close_after, Close};
