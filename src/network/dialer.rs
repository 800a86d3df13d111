//! TCP Dialer
//!
//! Connects to the destination once, optionally from a fixed source address.

use std::io;
use std::net::{SocketAddr, TcpStream};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::config::Config;
use crate::error::{NcError, Result};

use super::{resolve, resolve_source, Connection};

/// Resolve the source (if any) and dial the destination
///
/// Candidates are tried in resolver order, each exactly once. When a source
/// address is bound, only destinations of the same family are candidates,
/// and the source itself is picked to match a destination where possible.
pub fn resolve_and_dial(config: &Config) -> Result<Connection> {
    // A destination lookup failure is only reported once the source checks out
    let destinations = resolve(&config.host, config.port, config.family);

    let local = match config.source_addr.as_deref() {
        Some(source) => {
            let known = destinations.as_deref().unwrap_or(&[]);
            let addr = resolve_source(source, config.family, known)
                .map_err(NcError::AddressResolution)?;
            if config.verbose {
                tracing::info!("binding to {} as source address", addr);
            }
            Some(addr)
        }
        None => None,
    };

    if config.verbose {
        tracing::info!("connecting to {}", config.destination());
    }

    let candidates: Vec<SocketAddr> = destinations
        .map_err(NcError::Dial)?
        .into_iter()
        .filter(|dest| local.map_or(true, |l| l.is_ipv4() == dest.is_ipv4()))
        .collect();

    let mut last_err = None;
    for dest in candidates {
        match dial(dest, local) {
            Ok(stream) => {
                let conn = Connection::new(stream).map_err(NcError::Dial)?;
                if config.verbose {
                    tracing::info!("connected to {}", conn.peer_addr());
                }
                return Ok(conn);
            }
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", dest, e);
                last_err = Some(e);
            }
        }
    }

    Err(NcError::Dial(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no destination address matches the source address family",
        )
    })))
}

fn dial(dest: SocketAddr, local: Option<SocketAddr>) -> io::Result<TcpStream> {
    let Some(local) = local else {
        return TcpStream::connect(dest);
    };

    let socket = Socket::new(Domain::for_address(dest), Type::STREAM, Some(Protocol::TCP))?;
    socket.bind(&SockAddr::from(local))?;
    socket.connect(&SockAddr::from(dest))?;

    Ok(socket.into())
}
