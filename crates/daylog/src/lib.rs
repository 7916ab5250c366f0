//! Leveled logging with console and rotating, date-stamped file sinks.
//!
//! A [`Log`] registry filters events by [`Level`] and fans the formatted
//! line out to every registered [`Appender`]. Three sink kinds are
//! provided:
//!
//! - [`ConsoleAppender`] — direct, unbuffered write to stdout.
//! - [`FileAppender`] — one file per day, rotated, gzipped and expired by
//!   the [`FileManager`] retention policy on every write.
//! - [`QueuedFileAppender`] — the same file sink behind an unbounded queue
//!   drained by a background worker, so callers never block on file I/O.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use daylog::{FileAppender, Level, Log, QueuedFileAppender, log_info};
//!
//! # fn main() -> daylog::Result<()> {
//! let mut file = FileAppender::new();
//! file.manager_mut().set_directory("/var/log/myapp")?;
//! file.manager_mut().set_prefix("myapp");
//! file.manager_mut().set_max_age_days(30);
//!
//! let mut log = Log::new(Level::Info);
//! log.add_appender(Arc::new(QueuedFileAppender::new(file)));
//!
//! log_info!(log, "service started on port {}", 8080);
//! # Ok(())
//! # }
//! ```
//!
//! Internal failures of the pipeline (a file that cannot be opened, an
//! archive that cannot be removed) are reported through `tracing` and never
//! propagate to logging call sites.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod appender;
mod clock;
mod error;
mod file;
mod level;
mod macros;
mod queue;
mod queued;
mod registry;
mod retention;

pub use appender::{Appender, ConsoleAppender};
pub use clock::{format_timestamp, log_timestamp};
pub use error::{Error, Result};
pub use file::{FileAppender, SizedFileAppender};
pub use level::Level;
pub use queued::QueuedFileAppender;
pub use registry::Log;
pub use retention::FileManager;
