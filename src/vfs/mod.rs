//! vfs.file plugin - File metrics exported to the monitoring agent
//!
//! This module provides:
//! - The `vfs.file.size` export (bytes or newline count)
//! - Item key parsing
//! - Metric registration and dispatch

pub mod error;
pub mod key;
pub mod plugin;
pub mod size;
