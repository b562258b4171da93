//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{MetricResult, ResultSet};
use crate::vfs::key::ItemKey;
use std::io::Write;

/// Prefix the agent uses for values it could not collect
pub const NOT_SUPPORTED: &str = "ZBX_NOTSUPPORTED";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec only fails if serialization fails
        if self.write_body(result_set, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Render to a writer, newline terminated
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        self.write_body(result_set, &mut writer)?;
        writeln!(writer)
    }

    fn write_body<W: Write>(&self, result_set: &ResultSet, writer: &mut W) -> std::io::Result<()> {
        match self.config.format {
            OutputFormat::Jsonl => self.write_jsonl(result_set, writer),
            OutputFormat::Json => self.write_json(result_set, writer),
            OutputFormat::Markdown => writer.write_all(self.render_markdown(result_set).as_bytes()),
            OutputFormat::Raw => writer.write_all(self.render_raw(result_set).as_bytes()),
        }
    }

    /// Stream one JSON object per result
    fn write_jsonl<W: Write>(&self, result_set: &ResultSet, writer: &mut W) -> std::io::Result<()> {
        let separator: &[u8] = if self.config.pretty { b"\n\n" } else { b"\n" };

        for (i, item) in result_set.items.iter().enumerate() {
            if i > 0 {
                writer.write_all(separator)?;
            }
            if self.config.pretty {
                serde_json::to_writer_pretty(&mut *writer, item)?;
            } else {
                serde_json::to_writer(&mut *writer, item)?;
            }
        }
        Ok(())
    }

    /// Stream all results as one JSON array
    fn write_json<W: Write>(&self, result_set: &ResultSet, writer: &mut W) -> std::io::Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(writer, &result_set.items)?;
        } else {
            serde_json::to_writer(writer, &result_set.items)?;
        }
        Ok(())
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let (errors, values): (Vec<&MetricResult>, Vec<&MetricResult>) =
            result_set.items.iter().partition(|item| item.is_error());

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                if let Some(error) = &item.error {
                    output.push_str(&format!(
                        "- `{}`: **{}**: {}\n",
                        item_key(item),
                        error.code,
                        error.message
                    ));
                }
            }
            output.push('\n');
        }

        if !values.is_empty() {
            output.push_str("## Metrics\n\n");
            for item in values {
                output.push_str(&format!("- `{}`", item_key(item)));
                if let Some(value) = item.value {
                    output.push_str(&format!(": {}", value));
                }
                if let Some(description) = &item.description {
                    output.push_str(&format!(" - {}", description));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        output
    }

    /// Render bare values, one per line
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .map(|item| match (&item.error, item.value) {
                (Some(error), _) => format!("{}: {}", NOT_SUPPORTED, error.message),
                (None, Some(value)) => value.to_string(),
                (None, None) => item_key(item),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Item key form of a result, quoting parameters where needed
fn item_key(item: &MetricResult) -> String {
    ItemKey::new(item.key.clone(), item.params.clone()).to_string()
}
