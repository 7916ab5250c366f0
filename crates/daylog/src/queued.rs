//! Asynchronous file sink: enqueue on the caller, flush on a worker.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::appender::Appender;
use crate::file::FileAppender;
use crate::queue::SafeQueue;

/// Default pause between sync cycles.
const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(2);

/// State shared between the producers, the worker and the final drain.
struct Shared {
    file: FileAppender,
    queue: SafeQueue,
    running: AtomicBool,
}

impl Shared {
    /// One sync cycle: open today's file once (the rotation pass runs at
    /// open time), drain the whole queue into it, close.
    ///
    /// A failed open leaves the queue intact; the next cycle is the retry.
    /// No timeout guards the file operations, so a stuck filesystem call
    /// stalls this cycle for as long as it takes. Known limitation.
    fn sync(&self) {
        let mut file = match self.file.open_today() {
            Ok(file) => file,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };
        while let Some(event) = self.queue.pop() {
            if let Err(e) = file.write_all(event.as_bytes()) {
                warn!("failed to write log file: {e}");
            }
        }
    }
}

/// Asynchronous date-stamped file sink.
///
/// [`write`](Appender::write) only pushes onto the queue; a dedicated
/// worker thread wakes once per flush interval and drains everything that
/// accumulated into the day's file. Events from one producer reach the file
/// in enqueue order; ordering across producers is whatever order the queue
/// serialized their pushes in.
///
/// Dropping the sink stops the worker, joins it and performs one final
/// drain, so everything enqueued before the drop is on disk when the drop
/// returns. Events written after [`shutdown`](Self::shutdown) stay queued
/// and are discarded with the sink.
pub struct QueuedFileAppender {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl QueuedFileAppender {
    /// Starts the worker over a configured file sink.
    ///
    /// The retention policy is fixed at this point: configure the
    /// [`FileAppender`] before wrapping it.
    pub fn new(file: FileAppender) -> Self {
        Self::with_flush_interval(file, DEFAULT_FLUSH_INTERVAL)
    }

    /// Starts the worker with a custom pause between sync cycles.
    ///
    /// The stop flag is observed once per pause, so shutdown latency is
    /// bounded by roughly one interval.
    pub fn with_flush_interval(file: FileAppender, flush_interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            file,
            queue: SafeQueue::new(),
            running: AtomicBool::new(true),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            while worker_shared.running.load(Ordering::Acquire) {
                thread::sleep(flush_interval);
                worker_shared.sync();
            }
            debug!("flush worker exiting");
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// The retention policy backing the wrapped file sink.
    pub fn manager(&self) -> &crate::FileManager {
        self.shared.file.manager()
    }

    /// Stops the worker and flushes everything still queued.
    ///
    /// Runs at most once; `Drop` calls it too. The final drain after the
    /// join is mandatory even when the worker's last cycle already emptied
    /// the queue: it closes the race between the stop signal landing and a
    /// worker that was mid-sleep at the time.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.shared.running.store(false, Ordering::Release);
        if worker.join().is_err() {
            warn!("flush worker panicked");
        }
        self.shared.sync();
    }
}

impl Drop for QueuedFileAppender {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Appender for QueuedFileAppender {
    /// Enqueues the event. The filesystem is never touched on the calling
    /// thread.
    fn write(&self, event: &str) {
        self.shared.queue.push(event.to_string());
    }
}
