//! Export backend - Runs metric exports and prints the results

use anyhow::{bail, Context, Result};
use std::io;
use tracing::info;

use crate::core::model::{MetricError, MetricResult, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::vfs::key::ItemKey;
use crate::vfs::plugin::{Plugin, SIZE_KEY};

/// Build the params list for `vfs.file.size` from positional arguments
pub fn size_params(path: &str, mode: Option<&str>) -> Vec<String> {
    let mut params = vec![path.to_string()];
    if let Some(mode) = mode {
        params.push(mode.to_string());
    }
    params
}

/// Export one item key through the plugin
pub fn collect(plugin: &Plugin, key: &str) -> MetricResult {
    let item: ItemKey = match key.parse() {
        Ok(item) => item,
        Err(e) => {
            let error = MetricError::from(&e);
            return MetricResult::error(key, Vec::new(), error);
        }
    };

    let outcome = plugin.export_item(&item);
    MetricResult::from_export(item.key, item.params, &outcome)
}

/// Print the result set, then fail if it carries an error
fn emit(result_set: &ResultSet, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    renderer
        .render_to(result_set, io::stdout().lock())
        .context("Failed to write output")?;

    if let Some(error) = result_set.first_error() {
        bail!("{}", error.message);
    }
    Ok(())
}

/// Run the size command
pub fn run_size(path: &str, mode: Option<&str>, config: RenderConfig) -> Result<()> {
    let params = size_params(path, mode);
    let outcome = Plugin::new().export(SIZE_KEY, &params);

    let mut result_set = ResultSet::new();
    result_set.push(MetricResult::from_export(SIZE_KEY, params, &outcome));
    emit(&result_set, config)
}

/// Run the get command
pub fn run_get(key: &str, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    result_set.push(collect(&Plugin::new(), key));
    emit(&result_set, config)
}

/// Run the list command
pub fn run_list(config: RenderConfig) -> Result<()> {
    let plugin = Plugin::new();
    info!(count = plugin.metrics().len(), "listing metrics");

    let mut result_set = ResultSet::new();
    for metric in plugin.metrics() {
        result_set.push(MetricResult::metric(metric));
    }
    emit(&result_set, config)
}
