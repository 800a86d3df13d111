//! Error types for fastnc
//!
//! Every failure is tagged with the phase it happened in. The message is a
//! short static description followed by the underlying cause, so the binary
//! can print it as a single line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using NcError
pub type Result<T> = std::result::Result<T, NcError>;

/// Unified error type for fastnc operations
#[derive(Debug, Error)]
pub enum NcError {
    // -------------------------------------------------------------------------
    // Validation Errors (before any I/O)
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Connection Establishment Errors
    // -------------------------------------------------------------------------
    #[error("failed to listen: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error("failed to resolve source address: {0}")]
    AddressResolution(#[source] io::Error),

    #[error("failed to connect: {0}")]
    Dial(#[source] io::Error),

    // -------------------------------------------------------------------------
    // Local Stream Errors
    // -------------------------------------------------------------------------
    #[error("failed to open file {} for {mode}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        mode: &'static str,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Relay Errors
    // -------------------------------------------------------------------------
    #[error("failed to read from {from}: {source}")]
    Read {
        from: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to {to}: {source}")]
    Write {
        to: &'static str,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Teardown Errors
    // -------------------------------------------------------------------------
    #[error("failed to close {what}: {source}")]
    Close {
        what: &'static str,
        #[source]
        source: io::Error,
    },
}

impl NcError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        NcError::Validation(msg.into())
    }

    /// True if the error was raised before any I/O took place
    pub fn is_validation(&self) -> bool {
        matches!(self, NcError::Validation(_))
    }
}
