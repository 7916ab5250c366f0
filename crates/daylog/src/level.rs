//! Log severity levels.

use std::fmt;

/// Severity of a log event.
///
/// Ordered from least to most severe; the registry accepts an event when its
/// level is at or above the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained diagnostic events.
    Debug,
    /// Routine operational events.
    Info,
    /// Something unexpected the application can tolerate.
    Warn,
    /// An operation failed.
    Error,
    /// The application cannot continue.
    Fatal,
}

impl Level {
    /// Tag used in formatted log lines.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn tags() {
        assert_eq!(Level::Warn.tag(), "WARN");
        assert_eq!(Level::Fatal.to_string(), "FATAL");
    }
}
