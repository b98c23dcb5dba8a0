//! Namespaced debug logging filtered by a `DEBUG`-style specification
//!
//! ```no_run
//! use nsdebug::{debugf, debugln};
//!
//! nsdebug::init("server:*,-server:health").expect("valid debug spec");
//!
//! let log = nsdebug::debug("server");
//! let http = log.child("http");
//! debugf!(http, "listening on {}", 8080);
//! debugln!(http, "ready", true);
//! ```
//!
//! Disabled loggers cost one boolean check per call. The macros go further and
//! skip evaluating their arguments entirely.

pub mod cli;
pub mod config;
pub mod debugger;
pub mod filter;
pub mod logger;
pub mod report;
pub mod writer;

use anyhow::Context;
use colored::Colorize;
use std::sync::{Arc, OnceLock};

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use config::{ConfigError, DebugConfig, OutputTarget};
pub use debugger::Debugger;
pub use filter::{FilterParseError, FilterTable, NameMatcher, Verdict};
pub use logger::Logger;
pub use writer::{Clock, LineWriter, ManualClock, MemorySink, Sink, SystemClock};

/// Log with `format!` syntax; arguments are not evaluated when disabled
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.enabled() {
            logger.printf(::std::format_args!($($arg)+));
        }
    }};
}

/// Log values separated by spaces; values are not evaluated when disabled
#[macro_export]
macro_rules! debugln {
    ($logger:expr $(,)?) => {{
        let logger = &$logger;
        if logger.enabled() {
            logger.println(&[]);
        }
    }};
    ($logger:expr, $($value:expr),+ $(,)?) => {{
        let logger = &$logger;
        if logger.enabled() {
            logger.println(&[$(&$value as &dyn ::std::fmt::Display),+]);
        }
    }};
}

static GLOBAL: OnceLock<Debugger> = OnceLock::new();

/// Compile `spec` into the process-wide debugger, writing to standard error
///
/// Calling this again replaces the specification. Initialise before handing
/// loggers to other threads.
pub fn init(spec: &str) -> Result<&'static Debugger, FilterParseError> {
    let table = Arc::new(FilterTable::parse(spec)?);
    match GLOBAL.get() {
        Some(debugger) => {
            debugger.replace_table(table);
            Ok(debugger)
        }
        None => Ok(GLOBAL.get_or_init(|| Debugger::from_parts(table, LineWriter::stderr()))),
    }
}

/// Initialise the process-wide debugger from `DEBUG` and `DEBUG_OUTPUT`
pub fn init_from_env() -> Result<&'static Debugger, ConfigError> {
    init_with_config(&DebugConfig::from_env())
}

pub fn init_with_config(config: &DebugConfig) -> Result<&'static Debugger, ConfigError> {
    let table = Arc::new(FilterTable::parse(&config.spec)?);
    let sink = config.open_sink()?;
    match GLOBAL.get() {
        Some(debugger) => {
            debugger.set_sink(sink);
            debugger.replace_table(table);
            Ok(debugger)
        }
        None => Ok(GLOBAL.get_or_init(|| Debugger::from_parts(table, LineWriter::new(sink)))),
    }
}

/// The process-wide debugger
///
/// Built from the environment on first use when no `init*` call came first.
/// Panics if that configuration is invalid, since a broken specification must
/// not silently turn logging on or off.
pub fn global() -> &'static Debugger {
    GLOBAL.get_or_init(|| {
        DebugConfig::from_env()
            .build()
            .unwrap_or_else(|err| panic!("invalid debug configuration: {err}"))
    })
}

/// Acquire a logger from the process-wide debugger
pub fn debug(name: impl Into<String>) -> Logger {
    global().debug(name)
}

pub fn reparse(spec: &str) -> Result<(), FilterParseError> {
    global().reparse(spec)
}

pub fn set_sink(sink: Sink) -> Sink {
    global().set_sink(sink)
}

/// Config file values overridden by command-line options and their variables
fn load_cli_config(cli: &cli::Cli) -> anyhow::Result<DebugConfig> {
    let mut config =
        config::load_config(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(spec) = &cli.spec {
        config.spec = spec.clone();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    Ok(config)
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    cli.color.apply();

    let config = load_cli_config(&cli)?;
    let format = cli.format;

    match &cli.command {
        Commands::Check { names } => {
            let table = FilterTable::parse(&config.spec).context("Invalid debug specification")?;
            let verdicts: Vec<_> = names.iter().map(|name| table.explain(name)).collect();
            match format {
                OutputFormat::Text => {
                    print!("{}", report::format_verdicts_text(&table, &verdicts))
                }
                OutputFormat::Json => {
                    println!("{}", report::format_verdicts_json(&table, &verdicts))
                }
            }
        }
        Commands::Explain { name } => {
            let table = FilterTable::parse(&config.spec).context("Invalid debug specification")?;
            let verdict = table.explain(name);
            match format {
                OutputFormat::Text => print!("{}", report::format_explain_text(&verdict)),
                OutputFormat::Json => println!("{}", report::format_explain_json(&verdict)),
            }
        }
        Commands::Patterns => {
            let table = FilterTable::parse(&config.spec).context("Invalid debug specification")?;
            match format {
                OutputFormat::Text => print!("{}", report::format_patterns_text(&table)),
                OutputFormat::Json => println!("{}", report::format_patterns_json(&table)),
            }
        }
        Commands::Emit {
            name,
            children,
            message,
        } => {
            let debugger = config.build().context("Failed to set up debug output")?;
            let logger = children
                .iter()
                .fold(debugger.debug(name.as_str()), |logger, segment| {
                    logger.child(segment)
                });

            if !logger.enabled() {
                eprintln!(
                    "{}",
                    format!(
                        "Logger '{}' is disabled by specification {:?}",
                        logger.name(),
                        config.spec
                    )
                    .yellow()
                );
                return Ok(());
            }

            let values: Vec<&dyn std::fmt::Display> =
                message.iter().map(|m| m as &dyn std::fmt::Display).collect();
            logger.println(&values);

            if debugger.writer().write_failures() > 0 {
                anyhow::bail!("Failed to write to debug output");
            }
        }
    }

    Ok(())
}
