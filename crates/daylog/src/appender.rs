//! The sink capability shared by all appenders.

use std::io::Write;

/// A destination that accepts formatted log events.
///
/// Sinks receive fully formatted lines; level filtering and formatting
/// happen in [`Log`](crate::Log) before this entry point is reached. The
/// variants are independent structs composed behind this trait rather than
/// an inheritance chain: console, file and queued-file sinks share nothing
/// but the capability.
pub trait Appender: Send + Sync {
    /// Persists one formatted event.
    ///
    /// Failures never propagate to the caller; a sink that cannot persist
    /// an event reports a diagnostic and drops it.
    fn write(&self, event: &str);
}

/// Direct, unbuffered sink writing to stdout.
#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    /// Creates a console sink.
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn write(&self, event: &str) {
        let mut out = std::io::stdout().lock();
        let _ = out.write_all(event.as_bytes());
        let _ = out.flush();
    }
}
