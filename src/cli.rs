//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::core::render::{OutputFormat, RenderConfig};

/// vfs-file-size - report a file's size in bytes or its newline count.
#[derive(Parser, Debug)]
#[command(name = "vfs-file-size")]
#[command(
    author,
    version,
    about,
    long_about = r#"vfs-file-size runs the vfs.file.size agent metric and prints the result.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line
- json: a single JSON array
- md: human-friendly Markdown
- raw: the bare value, or ZBX_NOTSUPPORTED: <message> on failure

Examples:
    vfs-file-size size /var/log/syslog
    vfs-file-size size /var/log/syslog lines
    vfs-file-size get 'vfs.file.size[/var/log/syslog,lines]'
    vfs-file-size list
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        env = "VFS_FILE_SIZE_FORMAT",
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Can also be set with the VFS_FILE_SIZE_FORMAT environment variable."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export vfs.file.size for a path.
    #[command(long_about = "Export vfs.file.size[PATH,MODE].\n\n\
MODE is bytes (default) or lines. lines counts newline bytes, so a final line\n\
without a trailing newline is not counted.\n\n\
Examples:\n\
  vfs-file-size size /etc/passwd\n\
  vfs-file-size size /etc/passwd lines\n")]
    Size {
        /// File path.
        #[arg(value_name = "PATH")]
        path: String,

        /// Measurement mode (bytes/lines).
        #[arg(value_name = "MODE")]
        mode: Option<String>,
    },

    /// Export a metric given as an item key.
    #[command(long_about = r#"Parse an agent item key and export it.

Parameters may be quoted with double quotes; \" escapes a quote inside.

Examples:
    vfs-file-size get 'vfs.file.size[/etc/passwd]'
    vfs-file-size get 'vfs.file.size["/tmp/a, b",lines]'
"#)]
    Get {
        /// Item key, e.g. vfs.file.size[/etc/passwd,lines].
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// List supported metrics.
    List,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::Size { path, mode } => {
            crate::backends::export::run_size(&path, mode.as_deref(), render_config)
        }
        Commands::Get { key } => crate::backends::export::run_get(&key, render_config),
        Commands::List => crate::backends::export::run_list(render_config),
    }
}
