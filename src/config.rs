//! Configuration for fastnc
//!
//! Built once at startup from the command line and read-only afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{NcError, Result};

/// Validated configuration for a single invocation
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Address family restriction
    pub family: Family,

    /// Listen for one connection or dial out
    pub mode: Mode,

    /// Local address to bind before dialing (connect mode only)
    pub source_addr: Option<String>,

    /// Destination host (the bind host in listen mode)
    pub host: String,

    /// Destination port (the bind port in listen mode, 0 = ephemeral)
    pub port: u16,

    // -------------------------------------------------------------------------
    // Local Stream Configuration
    // -------------------------------------------------------------------------
    /// File to send instead of stdin (connect mode only)
    pub input_file: Option<PathBuf>,

    /// File to write instead of stdout (listen mode only)
    pub output_file: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------
    /// Report addresses on the diagnostic stream
    pub verbose: bool,
}

/// Address family restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Family {
    /// Whatever the resolver returns, tried in order
    #[default]
    Any,

    /// IPv4 only (`-4`)
    V4,

    /// IPv6 only (`-6`)
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Any => f.write_str("IPv4 or IPv6"),
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// Which side of the connection we are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Dial the destination and send local input to it
    #[default]
    Connect,

    /// Accept one connection and write what it sends locally
    Listen,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port`, with IPv6 literals bracketed
    pub fn destination(&self) -> String {
        join_host_port(&self.host, self.port)
    }

    pub fn is_listen(&self) -> bool {
        self.mode == Mode::Listen
    }

    pub fn input_file(&self) -> Option<&Path> {
        self.input_file.as_deref()
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}

/// Join a host and port the way `host:port` strings are usually written
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Builder for Config
///
/// Takes the raw flags as given on the command line. `build` rejects
/// illegal combinations before anything touches the network.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    ipv4_only: bool,
    ipv6_only: bool,
    listen: bool,
    source_addr: Option<String>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    verbose: bool,
    host: String,
    port: u16,
}

impl ConfigBuilder {
    /// Restrict to IPv4 (`-4`)
    pub fn ipv4_only(mut self, on: bool) -> Self {
        self.ipv4_only = on;
        self
    }

    /// Restrict to IPv6 (`-6`)
    pub fn ipv6_only(mut self, on: bool) -> Self {
        self.ipv6_only = on;
        self
    }

    /// Listen mode (`-l`)
    pub fn listen(mut self, on: bool) -> Self {
        self.listen = on;
        self
    }

    /// Source address to bind (`-s`)
    pub fn source_addr(mut self, addr: impl Into<String>) -> Self {
        self.source_addr = Some(addr.into());
        self
    }

    /// Input file (`-i`)
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    /// Output file (`-o`)
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Verbose diagnostics (`-v`)
    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    /// Destination host and port
    pub fn destination(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Validate the flags and produce an immutable Config
    pub fn build(self) -> Result<Config> {
        if self.host.is_empty() {
            return Err(NcError::validation("destination must be specified"));
        }

        if self.ipv4_only && self.ipv6_only {
            return Err(NcError::validation("cannot specify both -4 and -6"));
        }

        // An empty -s is the same as no -s
        let source_addr = self.source_addr.filter(|s| !s.is_empty());

        if self.listen && source_addr.is_some() {
            return Err(NcError::validation(
                "cannot specify source address in listen mode",
            ));
        }

        if self.listen && self.input_file.is_some() {
            return Err(NcError::validation(
                "cannot specify input file in listen mode",
            ));
        }

        if !self.listen && self.output_file.is_some() {
            return Err(NcError::validation(
                "cannot specify output file in connect mode",
            ));
        }

        let family = match (self.ipv4_only, self.ipv6_only) {
            (true, _) => Family::V4,
            (_, true) => Family::V6,
            _ => Family::Any,
        };

        let mode = if self.listen { Mode::Listen } else { Mode::Connect };

        Ok(Config {
            family,
            mode,
            source_addr,
            host: self.host,
            port: self.port,
            input_file: self.input_file,
            output_file: self.output_file,
            verbose: self.verbose,
        })
    }
}
