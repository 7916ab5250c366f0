//! Rotation, retention and compression policy for date-stamped log files.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, warn};

use crate::clock::day_stamp;
use crate::error::{Error, Result};

/// Extensions recognized as compressed artifacts of a rotated day.
///
/// New archives are always written as gzip; `.zip` is accepted on listing so
/// directories populated by other platform builds still age out correctly.
const COMPRESSED_EXTENSIONS: [&str; 2] = ["gz", "zip"];

const DEFAULT_PREFIX: &str = "log";
const DEFAULT_MAX_AGE_DAYS: u64 = 100;

/// Owns a log directory and decides which physical files exist in it.
///
/// The active file for a day is `<dir>/<prefix>_<YYYYMMDD>.log`. Days that
/// have rotated out are gzipped in place (when compression is enabled), and
/// compressed artifacts are deleted once they age past the retention window.
/// A rotation pass never touches anything that does not carry the prefix.
#[derive(Debug, Clone)]
pub struct FileManager {
    dir: PathBuf,
    prefix: String,
    max_age_days: u64,
    compress: bool,
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileManager {
    /// Creates a policy over the current directory with a 100-day retention
    /// window and compression enabled.
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: true,
        }
    }

    /// Points the policy at `dir`, creating it if absent.
    ///
    /// On failure the policy falls back to the current directory and the
    /// error is returned to the caller, so the policy never references a
    /// directory that cannot be written to.
    pub fn set_directory(&mut self, dir: impl Into<PathBuf>) -> Result<()> {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            self.dir = PathBuf::from(".");
            return Err(Error::Directory {
                dir: dir.display().to_string(),
                source: e,
            });
        }
        self.dir = dir;
        Ok(())
    }

    /// Directory currently owned by the policy.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Sets the file-name prefix for this sink.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// File-name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sets the retention window in days.
    pub fn set_max_age_days(&mut self, days: u64) {
        self.max_age_days = days;
    }

    /// Enables or disables compress-on-rotate.
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Stem of the active file for the current date.
    pub fn today_file_stem(&self) -> String {
        self.stem_for(Local::now().date_naive())
    }

    /// Stem of the oldest day still inside the retention window.
    ///
    /// Formatted identically to [`today_file_stem`](Self::today_file_stem),
    /// so the two compare lexicographically as dates.
    pub fn earliest_retained_stem(&self) -> String {
        self.earliest_stem_at(Local::now().date_naive())
    }

    /// Full path of the active file for the current date.
    pub fn today_file_path(&self) -> PathBuf {
        self.path_for_stem(&self.stem_for(Local::now().date_naive()), "log")
    }

    fn stem_for(&self, day: NaiveDate) -> String {
        format!("{}_{}", self.prefix, day_stamp(day))
    }

    fn earliest_stem_at(&self, today: NaiveDate) -> String {
        let earliest = today
            .checked_sub_days(Days::new(self.max_age_days))
            .unwrap_or(NaiveDate::MIN);
        self.stem_for(earliest)
    }

    fn path_for_stem(&self, stem: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{ext}"))
    }

    /// Runs one rotation/retention pass over the directory.
    ///
    /// Compressed artifacts older than the retention window are deleted;
    /// rotated `.log` files still inside the window are gzipped (when
    /// compression is enabled) with the original removed only after the
    /// archive has been fully written. An uncompressed file that has aged
    /// past the window is left alone until a compression pass reaches it:
    /// only compressed artifacts are ever deleted. Deleting aged `.log`
    /// files directly would change observable retention behavior, so the
    /// pass keeps the original policy and the tests pin it.
    ///
    /// Every failure is downgraded to a diagnostic; a file that could not be
    /// removed or compressed is picked up again by the next pass.
    pub fn arrange_files(&self) {
        self.arrange_files_at(Local::now().date_naive());
    }

    pub(crate) fn arrange_files_at(&self, today: NaiveDate) {
        let today_stem = self.stem_for(today);
        let earliest_stem = self.earliest_stem_at(today);

        let (log_stems, compressed_stems) = self.list_stems();

        for (stem, ext) in &compressed_stems {
            if stem.as_str() < earliest_stem.as_str() {
                let path = self.path_for_stem(stem, ext);
                debug!("removing expired archive {}", path.display());
                if let Err(e) = fs::remove_file(&path) {
                    warn!("failed to remove expired archive {}: {e}", path.display());
                }
            }
        }

        if !self.compress {
            return;
        }

        for stem in &log_stems {
            // Rotated out but still retained: compress in place.
            if stem.as_str() < today_stem.as_str() && stem.as_str() >= earliest_stem.as_str() {
                if let Err(e) = self.compress_stem(stem) {
                    warn!("failed to compress {stem}.log: {e}");
                }
            }
        }
    }

    /// Lists stems under the directory carrying the prefix, split into plain
    /// log stems and compressed stems with their actual extension.
    ///
    /// Both sets are sorted: directory iteration order is not guaranteed by
    /// the filesystem, and the retention comparisons assume chronological
    /// (which is lexicographic) order.
    fn list_stems(&self) -> (Vec<String>, Vec<(String, String)>) {
        let mut log_stems = Vec::new();
        let mut compressed_stems = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to list log directory {}: {e}", self.dir.display());
                return (log_stems, compressed_stems);
            }
        };

        let marker = format!("{}_", self.prefix);
        for entry in entries {
            let Ok(path) = entry.map(|e| e.path()) else {
                continue;
            };
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            if !stem.starts_with(&marker) {
                continue;
            }
            if ext == "log" {
                log_stems.push(stem.to_string());
            } else if COMPRESSED_EXTENSIONS.contains(&ext) {
                compressed_stems.push((stem.to_string(), ext.to_string()));
            }
        }

        log_stems.sort();
        compressed_stems.sort();
        (log_stems, compressed_stems)
    }

    /// Gzips `<stem>.log` into `<stem>.gz`, removing the original only once
    /// the archive has been fully written and closed. On any failure the
    /// original is left in place; a partially written archive is simply
    /// overwritten by the retry on the next pass.
    fn compress_stem(&self, stem: &str) -> io::Result<()> {
        let log_path = self.path_for_stem(stem, "log");
        let archive_path = self.path_for_stem(stem, "gz");

        let mut source = File::open(&log_path)?;
        let target = File::create(&archive_path)?;
        let mut encoder = GzEncoder::new(target, Compression::default());
        io::copy(&mut source, &mut encoder)?;
        encoder.finish()?;

        debug!("compressed {} to {}", log_path.display(), archive_path.display());
        fs::remove_file(&log_path)
    }
}
