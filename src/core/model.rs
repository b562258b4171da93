//! Unified Result Model
//!
//! Every export, successful or not, is mapped to a MetricResult before
//! rendering output.

use serde::{Deserialize, Serialize};

use crate::vfs::error::{KeyError, PluginError};
use crate::vfs::plugin::Metric;

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricError {
    pub code: String,
    pub message: String,
}

impl MetricError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&PluginError> for MetricError {
    fn from(err: &PluginError) -> Self {
        MetricError::new(err.code(), err.to_string())
    }
}

impl From<&KeyError> for MetricError {
    fn from(err: &KeyError) -> Self {
        MetricError::new(err.code(), err.to_string())
    }
}

/// The outcome of one metric request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
    /// Item key (without parameters)
    pub key: String,

    /// Parameters as passed to the export
    #[serde(default)]
    pub params: Vec<String>,

    /// Exported value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,

    /// Human-readable description (metric listings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Why no value was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MetricError>,
}

impl MetricResult {
    /// Create a result carrying a value
    pub fn value(key: impl Into<String>, params: Vec<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            params,
            value: Some(value),
            description: None,
            error: None,
        }
    }

    /// Create a failed result
    pub fn error(key: impl Into<String>, params: Vec<String>, error: MetricError) -> Self {
        Self {
            key: key.into(),
            params,
            value: None,
            description: None,
            error: Some(error),
        }
    }

    /// Build from an export outcome
    pub fn from_export(
        key: impl Into<String>,
        params: Vec<String>,
        outcome: &Result<u64, PluginError>,
    ) -> Self {
        match outcome {
            Ok(value) => Self::value(key, params, *value),
            Err(e) => Self::error(key, params, e.into()),
        }
    }

    /// Describe a registered metric
    pub fn metric(metric: &Metric) -> Self {
        Self {
            key: metric.key.to_string(),
            params: metric.params.split(',').map(str::to_string).collect(),
            value: None,
            description: Some(metric.description.to_string()),
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Result set containing multiple results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<MetricResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: MetricResult) {
        self.items.push(item);
    }

    /// First error in the set, if any
    pub fn first_error(&self) -> Option<&MetricError> {
        self.items.iter().find_map(|item| item.error.as_ref())
    }
}
