//! Local Streams
//!
//! The process's standard streams, or a file when a path was given.

use std::fs::File;
use std::io::{self, Read, StdinLock, StdoutLock, Write};
use std::path::Path;

use crate::error::{NcError, Result};

/// Where outgoing data comes from in connect mode
#[derive(Debug)]
pub enum LocalSource {
    Stdin(StdinLock<'static>),
    File(File),
}

impl LocalSource {
    /// Open `path` for reading, or fall back to stdin
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => File::open(path)
                .map(LocalSource::File)
                .map_err(|source| NcError::OpenFile {
                    path: path.to_path_buf(),
                    mode: "reading",
                    source,
                }),
            None => Ok(LocalSource::Stdin(io::stdin().lock())),
        }
    }

    /// Name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            LocalSource::Stdin(_) => "standard input",
            LocalSource::File(_) => "input file",
        }
    }
}

impl Read for LocalSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            LocalSource::Stdin(s) => s.read(buf),
            LocalSource::File(f) => f.read(buf),
        }
    }
}

/// Where incoming data goes in listen mode
#[derive(Debug)]
pub enum LocalSink {
    Stdout(StdoutLock<'static>),
    File(File),
}

impl LocalSink {
    /// Create (or truncate) `path` for writing, or fall back to stdout
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => File::create(path)
                .map(LocalSink::File)
                .map_err(|source| NcError::OpenFile {
                    path: path.to_path_buf(),
                    mode: "writing",
                    source,
                }),
            None => Ok(LocalSink::Stdout(io::stdout().lock())),
        }
    }

    /// Name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            LocalSink::Stdout(_) => "standard output",
            LocalSink::File(_) => "output file",
        }
    }
}

impl Write for LocalSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LocalSink::Stdout(s) => s.write(buf),
            LocalSink::File(f) => f.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LocalSink::Stdout(s) => s.flush(),
            LocalSink::File(f) => f.flush(),
        }
    }
}
