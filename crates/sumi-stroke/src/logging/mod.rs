//! Logging utilities.
//!
//! Centralizes logger initialization for binaries and tests built on this
//! crate. Library code itself only uses the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
