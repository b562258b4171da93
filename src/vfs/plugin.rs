//! Metric registry and dispatch for the vfs.file plugin

use tracing::{debug, warn};

use crate::vfs::error::PluginError;
use crate::vfs::key::ItemKey;
use crate::vfs::size::export_size;

/// Item key of the file size metric
pub const SIZE_KEY: &str = "vfs.file.size";

/// A registered metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub params: &'static str,
    pub description: &'static str,
}

const METRICS: &[Metric] = &[Metric {
    key: SIZE_KEY,
    params: "file,<mode>",
    description: "Returns file size.",
}];

/// The vfs.file plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct Plugin;

impl Plugin {
    pub fn new() -> Self {
        Self
    }

    /// Metrics this plugin answers for
    pub fn metrics(&self) -> &'static [Metric] {
        METRICS
    }

    /// Export a metric value
    pub fn export<S: AsRef<str>>(&self, key: &str, params: &[S]) -> Result<u64, PluginError> {
        let result = match key {
            SIZE_KEY => export_size(params).map_err(PluginError::from),
            _ => Err(PluginError::UnsupportedMetric(key.to_string())),
        };

        match &result {
            Ok(value) => debug!(key, value, "metric exported"),
            Err(e) => warn!(key, code = e.code(), "metric not supported: {}", e),
        }

        result
    }

    /// Export using a parsed item key
    pub fn export_item(&self, item: &ItemKey) -> Result<u64, PluginError> {
        self.export(&item.key, &item.params)
    }
}
