use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Trailing-debounce coalescer for detected snippets.
///
/// Two states: idle (no deadline) and pending (queued snippets plus a
/// deadline). Every enqueue restarts the quiet period; when the deadline
/// passes, one aggregate notification drains the queue and the machine
/// returns to idle. Time is injected as `Instant` arguments so tests
/// drive the machine without sleeping; the owner polls it from its event
/// loop. Dropping the aggregator drops any pending flush with it — there
/// is no timer thread left to fire after teardown.
#[derive(Debug)]
pub struct NotificationAggregator {
    queue: VecDeque<String>,
    deadline: Option<Instant>,
    delay: Duration,
    capacity: usize,
}

impl NotificationAggregator {
    pub fn new(delay: Duration, capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            deadline: None,
            delay,
            capacity,
        }
    }

    /// Queue a snippet and restart the quiet period. Past capacity the
    /// oldest snippet is evicted first.
    pub fn enqueue(&mut self, snippet: String, now: Instant) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(snippet);
        self.deadline = Some(now + self.delay);
    }

    /// Flush if the quiet period has elapsed: returns the queued snippets
    /// joined by newlines, in arrival order, and resets to idle.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        let joined = self
            .queue
            .drain(..)
            .collect::<Vec<_>>()
            .join("\n");
        Some(joined)
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant of the pending flush, if any. Lets the owning loop pick a
    /// wake-up timeout instead of busy-polling.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
