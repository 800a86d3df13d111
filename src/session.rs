//! Session Module
//!
//! One invocation end to end: establish the connection, relay, close.
//!
//! ## Resource Order
//! - Listen: listener (closed right after accept) → connection → sink
//! - Connect: connection → source
//!
//! Resources are closed in reverse order of opening. Each close goes
//! through `close_after`, so the first error is the one reported.

use crate::config::{Config, Mode};
use crate::error::Result;
use crate::network::{listen_and_accept, resolve_and_dial, Connection, Listener};
use crate::relay::{close_after, relay, LocalSink, LocalSource};

/// Run the configured mode to completion
///
/// Returns the number of bytes relayed.
pub fn run(config: &Config) -> Result<u64> {
    match config.mode {
        Mode::Listen => listen_mode(config),
        Mode::Connect => connect_mode(config),
    }
}

/// Bind, accept one peer, write what it sends to stdout or the output file
pub fn listen_mode(config: &Config) -> Result<u64> {
    let conn = listen_and_accept(config)?;
    receive(conn, config)
}

/// Listen-mode relay on an already bound listener
pub fn serve(listener: Listener, config: &Config) -> Result<u64> {
    let conn = listener.accept_one()?;
    receive(conn, config)
}

/// Write everything the peer sends to stdout or the output file
pub fn receive(mut conn: Connection, config: &Config) -> Result<u64> {
    let mut sink = match LocalSink::open(config.output_file()) {
        Ok(sink) => sink,
        Err(e) => return close_after(Err(e), conn, "connection"),
    };

    let (from, to) = ("connection", sink.label());
    let result = relay(&mut conn, &mut sink).map_err(|e| e.attribute(from, to));

    let result = close_after(result, sink, to);
    close_after(result, conn, "connection")
}

/// Dial the destination and send stdin or the input file to it
pub fn connect_mode(config: &Config) -> Result<u64> {
    let conn = resolve_and_dial(config)?;
    send(conn, config)
}

/// Connect-mode relay on an already established connection
pub fn send(mut conn: Connection, config: &Config) -> Result<u64> {
    let mut source = match LocalSource::open(config.input_file()) {
        Ok(source) => source,
        Err(e) => return close_after(Err(e), conn, "connection"),
    };

    let (from, to) = (source.label(), "connection");
    let result = relay(&mut source, &mut conn).map_err(|e| e.attribute(from, to));

    let result = close_after(result, source, from);
    close_after(result, conn, "connection")
}
