use crate::filter::{FilterParseError, FilterTable};
use crate::logger::Logger;
use crate::writer::{LineWriter, Sink};
use std::sync::{Arc, PoisonError, RwLock};

/// Owns the compiled filter table and the shared line writer
///
/// Cloning is cheap; every clone and every logger it hands out share the same
/// table and writer.
#[derive(Clone)]
pub struct Debugger {
    shared: Arc<Shared>,
}

struct Shared {
    table: RwLock<Arc<FilterTable>>,
    writer: LineWriter,
}

impl Debugger {
    /// Compile `spec` and write enabled lines to standard error
    pub fn new(spec: &str) -> Result<Self, FilterParseError> {
        Self::with_writer(spec, LineWriter::stderr())
    }

    pub fn with_sink(spec: &str, sink: Sink) -> Result<Self, FilterParseError> {
        Self::with_writer(spec, LineWriter::new(sink))
    }

    pub fn with_writer(spec: &str, writer: LineWriter) -> Result<Self, FilterParseError> {
        let table = FilterTable::parse(spec)?;
        Ok(Self::from_parts(Arc::new(table), writer))
    }

    pub fn from_parts(table: Arc<FilterTable>, writer: LineWriter) -> Self {
        Self {
            shared: Arc::new(Shared {
                table: RwLock::new(table),
                writer,
            }),
        }
    }

    /// Acquire a logger for `name`
    ///
    /// The verdict is resolved once here and never changes for the returned
    /// logger. Acquire loggers up front rather than per line.
    pub fn debug(&self, name: impl Into<String>) -> Logger {
        let name = name.into();
        let enabled = self.table().resolve(&name);
        Logger::new(name, enabled, self.clone())
    }

    /// The table currently used for new loggers
    pub fn table(&self) -> Arc<FilterTable> {
        self.shared
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the filter table with one compiled from `spec`
    ///
    /// On error the current table stays in place. Loggers acquired earlier keep
    /// their verdicts.
    pub fn reparse(&self, spec: &str) -> Result<(), FilterParseError> {
        let table = FilterTable::parse(spec)?;
        self.replace_table(Arc::new(table));
        Ok(())
    }

    pub fn replace_table(&self, table: Arc<FilterTable>) {
        *self
            .shared
            .table
            .write()
            .unwrap_or_else(PoisonError::into_inner) = table;
    }

    /// Redirect output, returning the previous sink
    pub fn set_sink(&self, sink: Sink) -> Sink {
        self.shared.writer.set_sink(sink)
    }

    pub fn writer(&self) -> &LineWriter {
        &self.shared.writer
    }
}

impl std::fmt::Debug for Debugger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debugger")
            .field("spec", &self.table().source())
            .field("writer", &self.shared.writer)
            .finish()
    }
}
