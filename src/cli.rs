mod output;

use crate::config::OutputTarget;
use clap::{Parser, Subcommand};
pub use output::{ColorMode, OutputFormat};
use std::path::PathBuf;

/// Check and exercise namespaced debug specifications
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug specification, e.g. "server:*,-server:health" (overrides the config file)
    #[arg(short, long, env = "DEBUG", global = true)]
    pub spec: Option<String>,

    /// Where emitted lines go: stderr, stdout or a file path
    #[arg(short, long, env = "DEBUG_OUTPUT", global = true)]
    pub output: Option<OutputTarget>,

    /// Path to a TOML config file with `spec` and `output` keys
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short = 'F', long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,

    /// When to use colors in text output
    #[arg(long, value_enum, default_value_t, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether each logger name is enabled
    Check {
        /// Logger names to resolve
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show which patterns decide whether a name is enabled
    Explain {
        /// Logger name to resolve
        name: String,
    },
    /// List the compiled include and exclude patterns
    Patterns,
    /// Write one line through a logger to the configured output
    Emit {
        /// Logger name
        name: String,

        /// Child segments appended to the name with ':' (repeatable)
        #[arg(long = "child")]
        children: Vec<String>,

        /// Values to log, joined with spaces
        message: Vec<String>,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
