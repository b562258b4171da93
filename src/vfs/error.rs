//! Error types for the vfs.file metrics

use std::io;
use thiserror::Error;

/// Failure of a `vfs.file.size` export.
///
/// The display text is what the agent reports back for an unsupported item,
/// so it is kept stable.
#[derive(Error, Debug)]
pub enum SizeError {
    #[error("Invalid number of parameters.")]
    InvalidParameterCount,

    #[error("Invalid first parameter.")]
    InvalidPath,

    #[error("Invalid second parameter.")]
    InvalidMode,

    #[error("Cannot obtain file information: {0}")]
    Stat(#[source] io::Error),

    #[error("Invalid first parameter: {0}")]
    Open(#[source] io::Error),

    #[error("Invalid file content: {0}")]
    Read(#[source] io::Error),
}

impl SizeError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SizeError::InvalidParameterCount => "INVALID_PARAMETER_COUNT",
            SizeError::InvalidPath => "INVALID_PATH",
            SizeError::InvalidMode => "INVALID_MODE",
            SizeError::Stat(_) => "STAT_ERROR",
            SizeError::Open(_) => "OPEN_ERROR",
            SizeError::Read(_) => "READ_ERROR",
        }
    }
}

/// Failure to dispatch a metric through the plugin.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Unsupported metric: {0}")]
    UnsupportedMetric(String),

    #[error(transparent)]
    Size(#[from] SizeError),
}

impl PluginError {
    pub fn code(&self) -> &'static str {
        match self {
            PluginError::UnsupportedMetric(_) => "UNSUPPORTED_METRIC",
            PluginError::Size(e) => e.code(),
        }
    }
}

/// Failure to parse an item key such as `vfs.file.size[/etc/passwd,lines]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Item key is empty")]
    Empty,

    #[error("Invalid character '{ch}' in item key at position {pos}")]
    InvalidKeyChar { ch: char, pos: usize },

    #[error("Unterminated parameter list")]
    UnterminatedParams,

    #[error("Unterminated quoted parameter starting at position {0}")]
    UnterminatedQuote(usize),

    #[error("Unexpected character '{ch}' after quoted parameter at position {pos}")]
    UnexpectedAfterQuote { ch: char, pos: usize },

    #[error("Unexpected quote in unquoted parameter at position {0}")]
    QuoteInUnquoted(usize),

    #[error("Trailing characters after parameter list at position {0}")]
    TrailingCharacters(usize),

    #[error("Nested parameter arrays are not supported (position {0})")]
    NestedArray(usize),
}

impl KeyError {
    pub fn code(&self) -> &'static str {
        "INVALID_KEY"
    }
}
