use crate::debugger::Debugger;
use std::fmt::{self, Display, Write as _};

/// A named debug logger
///
/// The name and enabled verdict are fixed when the logger is acquired. When the
/// logger is disabled every output method returns after a single boolean check:
/// nothing is formatted, allocated, locked or written.
#[derive(Clone)]
pub struct Logger {
    name: String,
    enabled: bool,
    debugger: Debugger,
}

impl Logger {
    pub(crate) fn new(name: String, enabled: bool, debugger: Debugger) -> Self {
        Self {
            name,
            enabled,
            debugger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Acquire the logger named `{name}:{segment}`
    ///
    /// The child is resolved against the current filter table on its own; it
    /// does not inherit this logger's verdict.
    pub fn child(&self, segment: &str) -> Logger {
        self.debugger.debug(format!("{}:{}", self.name, segment))
    }

    /// Write `values` separated by spaces
    pub fn print(&self, values: &[&dyn Display]) {
        if !self.enabled {
            return;
        }
        self.emit(&join_values(values));
    }

    /// Same output as [`Logger::print`]; both end the line exactly once
    pub fn println(&self, values: &[&dyn Display]) {
        if !self.enabled {
            return;
        }
        self.emit(&join_values(values));
    }

    /// Write pre-built format arguments, usually via [`crate::debugf!`]
    ///
    /// A newline is appended only when the rendered text lacks one.
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        if !self.enabled {
            return;
        }
        let mut body = String::new();
        let _ = body.write_fmt(args);
        self.emit(&body);
    }

    fn emit(&self, body: &str) {
        self.debugger.writer().emit(&self.name, body);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish()
    }
}

// A failing Display impl truncates its own value, not the line.
fn join_values(values: &[&dyn Display]) -> String {
    let mut body = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            body.push(' ');
        }
        let _ = write!(body, "{value}");
    }
    body
}
