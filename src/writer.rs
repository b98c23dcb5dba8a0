//! Line formatting and the shared output sink
//!
//! Every enabled logger of a [`crate::Debugger`] writes through one [`LineWriter`].
//! A line looks like:
//!
//! ```text
//!   server:http +12ms: request received
//! ```
//!
//! The elapsed time is measured from the previous line written by any logger.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Destination for rendered lines
pub type Sink = Box<dyn Write + Send>;

/// Source of monotonic time for elapsed-time prefixes
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct WriterState {
    sink: Sink,
    last: Instant,
}

/// Serializes log lines from all loggers onto a single sink
pub struct LineWriter {
    state: Mutex<WriterState>,
    clock: Arc<dyn Clock>,
    failures: AtomicU64,
}

impl LineWriter {
    pub fn new(sink: Sink) -> Self {
        Self::with_clock(sink, Arc::new(SystemClock))
    }

    /// A writer on the process's standard error stream
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    pub fn with_clock(sink: Sink, clock: Arc<dyn Clock>) -> Self {
        let last = clock.now();
        Self {
            state: Mutex::new(WriterState { sink, last }),
            clock,
            failures: AtomicU64::new(0),
        }
    }

    /// Write one line for `name`
    ///
    /// Reading the clock, formatting the prefix, writing and advancing the shared
    /// timestamp all happen under one lock, so lines never interleave and each
    /// elapsed time is measured from the line written just before it. Sink errors
    /// are counted, never returned.
    pub fn emit(&self, name: &str, body: &str) {
        let mut state = self.lock();

        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(state.last);

        let mut line = String::with_capacity(name.len() + body.len() + 16);
        let _ = write!(line, "  {name} +{}: {body}", format_elapsed(elapsed));
        if !line.ends_with('\n') {
            line.push('\n');
        }

        let result = state
            .sink
            .write_all(line.as_bytes())
            .and_then(|()| state.sink.flush());
        state.last = now;

        if result.is_err() {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Replace the sink, returning the previous one
    ///
    /// The elapsed-time baseline carries over to the new sink.
    pub fn set_sink(&self, sink: Sink) -> Sink {
        std::mem::replace(&mut self.lock().sink, sink)
    }

    /// Number of lines dropped because the sink failed
    pub fn write_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    // A panic inside a sink must not take logging down with it.
    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LineWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineWriter")
            .field("write_failures", &self.write_failures())
            .finish_non_exhaustive()
    }
}

/// Format an elapsed duration as `{n}ms` below one second, `{n}s` otherwise
pub fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{}s", ms / 1000)
    }
}

/// An in-memory sink whose contents can be read back through any clone
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer()).into_owned()
    }

    /// Return the contents and clear the buffer
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buffer());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
