//! Backends module - Command handlers
//!
//! - export: vfs.file.size exports, item key lookups and metric listing

pub mod export;
