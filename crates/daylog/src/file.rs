//! Synchronous file sinks.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::appender::Appender;
use crate::error::{Error, Result};
use crate::retention::FileManager;

/// Synchronous date-stamped file sink.
///
/// Every write runs a full rotation/retention pass, opens today's file in
/// append mode, writes the event and closes it again. Each write therefore
/// pays the full housekeeping cost, which is fine at low throughput and is
/// the reason [`QueuedFileAppender`](crate::QueuedFileAppender) exists.
///
/// The sink holds no lock of its own. Callers writing to it concurrently
/// must serialize externally; the queued wrapper is the intended
/// concurrency boundary.
#[derive(Debug, Default)]
pub struct FileAppender {
    manager: FileManager,
}

impl FileAppender {
    /// Creates a sink with a default retention policy.
    pub fn new() -> Self {
        Self {
            manager: FileManager::new(),
        }
    }

    /// Creates a sink over an already configured retention policy.
    pub fn with_manager(manager: FileManager) -> Self {
        Self { manager }
    }

    /// The retention policy backing this sink.
    pub fn manager(&self) -> &FileManager {
        &self.manager
    }

    /// Mutable access to the retention policy, for configuration.
    pub fn manager_mut(&mut self) -> &mut FileManager {
        &mut self.manager
    }

    /// Runs housekeeping and opens today's file for appending.
    ///
    /// The rotation pass runs here, once per open, so a batched writer pays
    /// it once per sync cycle instead of once per message. The file closes
    /// when the handle drops.
    pub(crate) fn open_today(&self) -> Result<File> {
        self.manager.arrange_files();
        let path = self.manager.today_file_path();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::Io("failed to open log file", e))
    }
}

impl Appender for FileAppender {
    fn write(&self, event: &str) {
        let mut file = match self.open_today() {
            Ok(file) => file,
            Err(e) => {
                // Degrade and continue; the next write retries from scratch.
                warn!("{e}");
                return;
            }
        };
        if let Err(e) = file.write_all(event.as_bytes()) {
            warn!("failed to write log file: {e}");
        }
    }
}

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Synchronous fixed-name file sink with a byte-size bound.
///
/// Instead of date-stamped rotation, the file is renamed to `<name>2` once
/// it grows past the bound, replacing any previous rollover, and a fresh
/// file begins on the next write. Exactly one generation of history is
/// kept.
#[derive(Debug)]
pub struct SizedFileAppender {
    path: PathBuf,
    max_file_size: u64,
}

impl SizedFileAppender {
    /// Creates a sink appending to `path` with a 10 MiB rotation bound.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Sets the rotation bound in bytes.
    pub fn set_max_file_size(&mut self, bytes: u64) {
        self.max_file_size = bytes;
    }

    /// Path the rolled-over file is moved to.
    fn rollover_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push("2");
        PathBuf::from(name)
    }

    /// Rotates after close once the file has outgrown the bound.
    fn rotate_if_oversized(&self) {
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => return,
        };
        if size <= self.max_file_size {
            return;
        }

        let rollover = self.rollover_path();
        // Rename over the previous rollover; remove it first on platforms
        // that refuse to replace an existing file.
        if fs::rename(&self.path, &rollover).is_err() {
            if let Err(e) = fs::remove_file(&rollover) {
                warn!("failed to remove old rollover {}: {e}", rollover.display());
            }
            if let Err(e) = fs::rename(&self.path, &rollover) {
                warn!("failed to rotate {}: {e}", self.path.display());
            }
        }
    }
}

impl Appender for SizedFileAppender {
    fn write(&self, event: &str) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path);
        let mut file = match file {
            Ok(file) => file,
            Err(e) => {
                warn!("failed to open log file {}: {e}", self.path.display());
                return;
            }
        };
        if let Err(e) = file.write_all(event.as_bytes()) {
            warn!("failed to write log file {}: {e}", self.path.display());
        }
        drop(file);
        self.rotate_if_oversized();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_append_to_todays_file() {
        let dir = TempDir::new().unwrap();
        let mut appender = FileAppender::new();
        appender.manager_mut().set_directory(dir.path()).unwrap();
        appender.manager_mut().set_prefix("app");

        appender.write("one\n");
        appender.write("two\n");

        let contents = fs::read_to_string(appender.manager().today_file_path()).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn todays_file_name_carries_prefix_and_stamp() {
        let dir = TempDir::new().unwrap();
        let mut appender = FileAppender::new();
        appender.manager_mut().set_directory(dir.path()).unwrap();
        appender.manager_mut().set_prefix("app");

        let path = appender.manager().today_file_path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("app_"));
        assert!(name.ends_with(".log"));
        // Stem is prefix, separator and an eight-digit day stamp.
        assert_eq!(name.len(), "app_".len() + 8 + ".log".len());
    }

    #[test]
    fn sized_sink_rolls_over_past_the_bound() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bounded.log");
        let mut appender = SizedFileAppender::new(&path);
        appender.set_max_file_size(100);

        // 150 bytes across two writes: the second close trips the bound.
        appender.write(&"a".repeat(80));
        assert!(path.exists());
        appender.write(&"b".repeat(70));

        let rollover = dir.path().join("bounded.log2");
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&rollover).unwrap().len(), 150);

        // The next write starts a fresh file next to the rollover.
        appender.write("fresh\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        assert!(rollover.exists());
    }

    #[test]
    fn sized_sink_replaces_previous_rollover() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bounded.log");
        let rollover = dir.path().join("bounded.log2");
        fs::write(&rollover, "stale generation").unwrap();

        let mut appender = SizedFileAppender::new(&path);
        appender.set_max_file_size(10);
        appender.write(&"x".repeat(32));

        assert_eq!(fs::read_to_string(&rollover).unwrap(), "x".repeat(32));
        assert!(!path.exists());
    }
}
