//! Thread-safe mailbox between producers and the flush worker.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Unbounded FIFO of pending formatted events.
///
/// Producers append under a mutex held only for the O(1) queue operation,
/// never across I/O, so contention stays bounded regardless of filesystem
/// latency. There is no backpressure: under sustained overload the queue
/// grows without bound. Known limitation, kept as a latency-over-memory
/// tradeoff.
#[derive(Debug, Default)]
pub(crate) struct SafeQueue {
    messages: Mutex<VecDeque<String>>,
}

impl SafeQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an event at the tail.
    pub(crate) fn push(&self, event: String) {
        self.messages.lock().push_back(event);
    }

    /// Removes and returns the head, or `None` when empty. Never blocks.
    pub(crate) fn pop(&self) -> Option<String> {
        self.messages.lock().pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fifo_order() {
        let queue = SafeQueue::new();
        queue.push("first".to_string());
        queue.push("second".to_string());
        queue.push("third".to_string());

        assert_eq!(queue.pop().as_deref(), Some("first"));
        assert_eq!(queue.pop().as_deref(), Some("second"));
        assert_eq!(queue.pop().as_deref(), Some("third"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn concurrent_pushes_lose_nothing() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 500;

        let queue = Arc::new(SafeQueue::new());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        queue.push(format!("{producer}:{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("producer thread panicked");
        }

        let mut drained = Vec::new();
        while let Some(event) = queue.pop() {
            drained.push(event);
        }

        // Drain count equals push count, nothing duplicated.
        assert_eq!(drained.len(), PRODUCERS * PER_PRODUCER);
        let unique: std::collections::HashSet<_> = drained.iter().collect();
        assert_eq!(unique.len(), drained.len());

        // Within each producer the enqueue order survived.
        for producer in 0..PRODUCERS {
            let marker = format!("{producer}:");
            let sequence: Vec<usize> = drained
                .iter()
                .filter_map(|e| e.strip_prefix(&marker))
                .map(|i| i.parse().unwrap())
                .collect();
            assert_eq!(sequence, (0..PER_PRODUCER).collect::<Vec<_>>());
        }
    }
}
