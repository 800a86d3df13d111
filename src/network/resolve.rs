//! Address Resolution
//!
//! Turns host strings into socket addresses restricted to one family.
//!
//! For `Family::Any` the resolver's order is kept as is and callers try
//! the candidates in that order, first success wins.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::config::Family;

impl Family {
    /// Whether an address belongs to this family
    pub fn admits(&self, addr: &SocketAddr) -> bool {
        match self {
            Family::Any => true,
            Family::V4 => addr.is_ipv4(),
            Family::V6 => addr.is_ipv6(),
        }
    }
}

/// Resolve `host:port` to every address of the requested family
///
/// Fails with `AddrNotAvailable` if the host resolves but nothing is left
/// after filtering.
pub fn resolve(host: &str, port: u16, family: Family) -> io::Result<Vec<SocketAddr>> {
    let host = strip_brackets(host);

    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()?
        .filter(|addr| family.admits(addr))
        .collect();

    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no {} address found for {}", family, host),
        ));
    }

    Ok(addrs)
}

/// Resolve a local source address with an ephemeral port
///
/// Prefers the first address whose family matches one of `destinations`,
/// so `localhost` picks 127.0.0.1 for an IPv4 peer even when the resolver
/// lists ::1 first. Falls back to the resolver's first answer.
pub fn resolve_source(
    host: &str,
    family: Family,
    destinations: &[SocketAddr],
) -> io::Result<SocketAddr> {
    let addrs = resolve(host, 0, family)?;

    let reachable = addrs
        .iter()
        .find(|src| destinations.iter().any(|dest| dest.is_ipv4() == src.is_ipv4()));

    // resolve() never returns an empty list
    Ok(*reachable.unwrap_or(&addrs[0]))
}

/// `[::1]` -> `::1`
fn strip_brackets(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}
