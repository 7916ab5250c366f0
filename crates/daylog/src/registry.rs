//! Fan-out registry of configured sinks.

use std::fmt;
use std::sync::Arc;

use crate::appender::Appender;
use crate::clock::log_timestamp;
use crate::level::Level;

/// Ordered collection of sinks behind a level threshold.
///
/// Explicitly constructed and explicitly passed: embedders (and tests)
/// build one registry per scope instead of sharing process-global mutable
/// state. Sinks are added at configuration time and iterated read-only at
/// log time; the `Arc` handles let a sink outlive the registry that
/// references it.
pub struct Log {
    level: Level,
    appenders: Vec<Arc<dyn Appender>>,
}

impl Log {
    /// Creates an empty registry accepting events at `level` and above.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            appenders: Vec::new(),
        }
    }

    /// Registers a sink at the end of the fan-out order.
    pub fn add_appender(&mut self, appender: Arc<dyn Appender>) {
        self.appenders.push(appender);
    }

    /// Sets the minimum accepted level.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Minimum accepted level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether events at `level` pass the threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Formats one event and fans it out to every registered sink.
    ///
    /// Each sink receives its own copy of the formatted line; sinks never
    /// share ownership of an event. Prefer the `log_*` macros, which
    /// capture the call site for you.
    pub fn log(&self, level: Level, message: fmt::Arguments<'_>, file: &str, line: u32) {
        if !self.enabled(level) {
            return;
        }
        let event = format!(
            "{} - {} - {} [ {} : {} ]\n",
            log_timestamp(),
            level.tag(),
            message,
            file,
            line
        );
        for appender in &self.appenders {
            appender.write(&event);
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Capture {
        events: Mutex<Vec<String>>,
    }

    impl Appender for Capture {
        fn write(&self, event: &str) {
            self.events.lock().push(event.to_string());
        }
    }

    impl Capture {
        fn taken(&self) -> Vec<String> {
            self.events.lock().clone()
        }
    }

    #[test]
    fn threshold_filters_lower_severities() {
        let capture = Arc::new(Capture::default());
        let mut log = Log::new(Level::Warn);
        log.add_appender(capture.clone());

        log.log(Level::Debug, format_args!("dropped"), file!(), line!());
        log.log(Level::Info, format_args!("dropped"), file!(), line!());
        log.log(Level::Warn, format_args!("kept"), file!(), line!());
        log.log(Level::Fatal, format_args!("kept"), file!(), line!());

        assert_eq!(capture.taken().len(), 2);
        assert!(!log.enabled(Level::Info));
        assert!(log.enabled(Level::Error));
    }

    #[test]
    fn every_sink_receives_its_own_copy() {
        let first = Arc::new(Capture::default());
        let second = Arc::new(Capture::default());
        let mut log = Log::new(Level::Debug);
        log.add_appender(first.clone());
        log.add_appender(second.clone());

        log.log(Level::Info, format_args!("fan out"), "registry.rs", 7);

        let from_first = first.taken();
        assert_eq!(from_first, second.taken());
        assert_eq!(from_first.len(), 1);
        assert!(from_first[0].contains(" - INFO - fan out [ registry.rs : 7 ]"));
        assert!(from_first[0].ends_with('\n'));
    }

    #[test]
    fn macros_capture_the_call_site() {
        let capture = Arc::new(Capture::default());
        let mut log = Log::new(Level::Debug);
        log.add_appender(capture.clone());

        crate::log_info!(log, "answer is {}", 42);
        crate::log_error!(log, "boom");

        let events = capture.taken();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("INFO - answer is 42"));
        assert!(events[0].contains("registry.rs"));
        assert!(events[1].contains("ERROR - boom"));
    }

    #[test]
    fn level_can_change_after_construction() {
        let capture = Arc::new(Capture::default());
        let mut log = Log::default();
        log.add_appender(capture.clone());

        log.set_level(Level::Fatal);
        log.log(Level::Error, format_args!("dropped"), file!(), line!());
        log.set_level(Level::Debug);
        log.log(Level::Debug, format_args!("kept"), file!(), line!());

        assert_eq!(capture.taken().len(), 1);
    }
}
