//! Connection Handle
//!
//! An established TCP stream plus the two addresses it was set up with.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

/// A live connection to one peer
///
/// Created by the establisher, handed over to the relay which closes it.
#[derive(Debug)]
pub struct Connection {
    /// Underlying TCP stream
    stream: TcpStream,

    /// Our end of the connection
    local_addr: SocketAddr,

    /// Remote end of the connection
    peer_addr: SocketAddr,
}

impl Connection {
    /// Wrap an established stream, capturing both endpoint addresses
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let local_addr = stream.local_addr()?;
        let peer_addr = stream.peer_addr()?;

        Ok(Self {
            stream,
            local_addr,
            peer_addr,
        })
    }

    /// Get the local address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get the peer address
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Borrow the underlying stream
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Shut down both directions and release the socket
    ///
    /// A peer that already went away is not an error.
    pub fn shutdown(self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}
