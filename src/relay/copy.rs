//! Copy Loop
//!
//! Streams a source into a sink until EOF or the first error.

use std::io::{self, Read, Write};

use crate::error::NcError;
use crate::network::Connection;

use super::{LocalSink, LocalSource};

/// Chunk size for the buffered path (1 MiB)
pub const BUFFER_SIZE: usize = 1024 * 1024;

/// A relay failure, split by the side that failed
#[derive(Debug)]
pub enum RelayError {
    /// Reading from the source failed
    Read(io::Error),

    /// Writing to the sink failed
    Write(io::Error),
}

impl RelayError {
    /// Attach endpoint labels, producing the crate error
    pub fn attribute(self, from: &'static str, to: &'static str) -> NcError {
        match self {
            RelayError::Read(source) => NcError::Read { from, source },
            RelayError::Write(source) => NcError::Write { to, source },
        }
    }
}

/// A destination for relayed bytes
///
/// Sinks with a faster way to drain a particular source override
/// `transfer_from`. Returning `None` selects the buffered copy.
pub trait Sink<S: ?Sized>: Write {
    /// Move all of `source` into `self` in one go, if this sink can
    ///
    /// The sink decides which side a failure belongs to.
    fn transfer_from(&mut self, _source: &mut S) -> Option<Result<u64, RelayError>> {
        None
    }
}

/// Copy everything from `source` into `sink`
///
/// Returns the number of bytes moved. Succeeds only once the source hit
/// EOF and the sink took every byte and flushed.
pub fn relay<S, K>(source: &mut S, sink: &mut K) -> Result<u64, RelayError>
where
    S: Read + ?Sized,
    K: Sink<S> + ?Sized,
{
    if let Some(result) = sink.transfer_from(source) {
        let copied = result?;
        tracing::debug!("Relayed {} bytes via bulk transfer", copied);
        return Ok(copied);
    }

    let copied = buffered_copy(source, sink)?;
    tracing::debug!("Relayed {} bytes via buffered copy", copied);
    Ok(copied)
}

fn buffered_copy<S, K>(source: &mut S, sink: &mut K) -> Result<u64, RelayError>
where
    S: Read + ?Sized,
    K: Write + ?Sized,
{
    let mut buf = vec![0u8; BUFFER_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RelayError::Read(e)),
        };

        sink.write_all(&buf[..n]).map_err(RelayError::Write)?;
        copied += n as u64;
    }

    sink.flush().map_err(RelayError::Write)?;
    Ok(copied)
}

// =============================================================================
// Sink Implementations
// =============================================================================

impl Sink<LocalSource> for Connection {
    /// On Linux `io::copy` between these concrete types goes through
    /// `sendfile`/`splice` and never touches a userspace buffer.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn transfer_from(&mut self, source: &mut LocalSource) -> Option<Result<u64, RelayError>> {
        let stream = self.stream_mut();
        let result = match source {
            LocalSource::Stdin(stdin) => io::copy(stdin, stream),
            LocalSource::File(file) => io::copy(file, stream),
        };
        Some(result.map_err(classify_socket_copy_error))
    }
}

/// Split a kernel-copy failure into the side that caused it
///
/// `io::copy` reports one error for both ends. Kinds a socket produces are
/// the connection's fault; anything else came from the local source.
pub fn classify_socket_copy_error(e: io::Error) -> RelayError {
    match e.kind() {
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::TimedOut
        | io::ErrorKind::WouldBlock => RelayError::Write(e),
        _ => RelayError::Read(e),
    }
}

impl<S: Read + ?Sized> Sink<S> for LocalSink {}

impl<S: Read + ?Sized> Sink<S> for Vec<u8> {}

impl<S: Read + ?Sized> Sink<S> for io::Sink {}
