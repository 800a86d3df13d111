//! # fastnc
//!
//! A simple, very fast netcat:
//! - Listen for exactly one inbound TCP connection, or dial exactly once
//! - Relay bytes one way between the connection and stdio or a file
//! - IPv4/IPv6 restriction and source-address binding
//! - Deterministic teardown with first-error-wins reporting
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI (bin/fastnc)                         │
//! │                  flags → validated Config                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                                │
//! │            establish → relay → close (in order)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Network   │          │    Relay    │
//!   │ listen/dial │─────────▶│ copy+close  │
//!   └─────────────┘Connection└─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod relay;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NcError, Result};
pub use config::{Config, Family, Mode};
pub use session::run;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of fastnc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
