//! Resource Teardown
//!
//! Explicit, error-aware close for everything the relay owns.
//!
//! `close` takes `self`, so a resource can be closed at most once, and
//! `close_after` keeps the first error when a close fails on top of an
//! earlier failure.

use std::io::{self, Write};

use crate::error::{NcError, Result};
use crate::network::Connection;

use super::{LocalSink, LocalSource};

/// A resource with a fallible close
pub trait Close {
    fn close(self) -> io::Result<()>;
}

impl Close for Connection {
    fn close(self) -> io::Result<()> {
        self.shutdown()
    }
}

impl Close for LocalSource {
    fn close(self) -> io::Result<()> {
        // stdin stays open, files have nothing to report on a read-only close
        drop(self);
        Ok(())
    }
}

impl Close for LocalSink {
    fn close(self) -> io::Result<()> {
        match self {
            LocalSink::Stdout(mut stdout) => stdout.flush(),
            LocalSink::File(mut file) => {
                file.flush()?;
                // Surfaces deferred write errors the kernel would otherwise drop.
                // Character devices and pipes (-o /dev/null) can't be synced.
                match file.sync_all() {
                    Err(e) if matches!(
                        e.kind(),
                        io::ErrorKind::InvalidInput | io::ErrorKind::Unsupported
                    ) => Ok(()),
                    other => other,
                }
            }
        }
    }
}

/// Close `resource` once `result` is known, first error wins
///
/// - `result` failed: it is returned; a close error is logged and dropped
/// - `result` succeeded: a close error becomes `NcError::Close`
pub fn close_after<T, C: Close>(result: Result<T>, resource: C, what: &'static str) -> Result<T> {
    let closed = resource.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(source)) => Err(NcError::Close { what, source }),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::debug!("Discarding error closing {}: {}", what, close_err);
            Err(e)
        }
    }
}
