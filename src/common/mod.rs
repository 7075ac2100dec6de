//! # Common Components
//!
//! Shared utilities used by the `lsb` CLI and the web server.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Logger setup

pub mod config;
pub mod logging;
