//! TCP Listener
//!
//! Binds the destination address and accepts exactly one connection.

use std::io;
use std::net::{SocketAddr, TcpListener};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::{Config, Family};
use crate::error::{NcError, Result};

use super::{resolve, Connection};

/// Pending connections the kernel queues for us. We only take one.
const BACKLOG: i32 = 1;

/// A bound listening socket, good for a single accept
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
    verbose: bool,
}

impl Listener {
    /// Bind the configured destination
    ///
    /// Each resolved address is tried in order; the first that binds wins.
    pub fn bind(config: &Config) -> Result<Self> {
        let addrs = resolve(&config.host, config.port, config.family).map_err(NcError::Bind)?;

        let mut last_err = None;
        for addr in addrs {
            match bind_socket(addr, config.family) {
                Ok(inner) => {
                    let local_addr = inner.local_addr().map_err(NcError::Bind)?;
                    tracing::debug!("Bound listener on {}", local_addr);
                    return Ok(Self {
                        inner,
                        local_addr,
                        verbose: config.verbose,
                    });
                }
                Err(e) => {
                    tracing::debug!("Bind to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(NcError::Bind(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "no address to bind")
        })))
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept one connection, then close the listener
    ///
    /// Consumes the listener: it is released when this returns, whether
    /// the accept succeeded or not, so no second peer is ever accepted.
    pub fn accept_one(self) -> Result<Connection> {
        if self.verbose {
            tracing::info!("listening on {}", self.local_addr);
        }

        let (stream, _) = self.inner.accept().map_err(NcError::Accept)?;
        let conn = Connection::new(stream).map_err(NcError::Accept)?;

        if self.verbose {
            tracing::info!("connection from {}", conn.peer_addr());
        }

        Ok(conn)
    }
}

/// Bind the configured destination and wait for a single peer
pub fn listen_and_accept(config: &Config) -> Result<Connection> {
    Listener::bind(config)?.accept_one()
}

fn bind_socket(addr: SocketAddr, family: Family) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;

    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    if addr.is_ipv6() {
        socket.set_only_v6(family == Family::V6)?;
    }

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    Ok(socket.into())
}
