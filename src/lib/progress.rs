//! Progress tracking utilities
//!
//! The sampling pass runs on one thread, so the tracker keeps its count in a [`Cell`] and logs
//! each time the count crosses a multiple of the interval.

use std::cell::Cell;

use log::info;

/// Logs progress at regular intervals during a single-threaded pass.
///
/// # Example
/// ```
/// use covmed_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Examined records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Logs at 100, 200
/// }
/// tracker.log_final(); // Logs "Examined records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: Cell<u64>,
}

impl ProgressTracker {
    /// Create a new progress tracker with a default interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: Cell::new(0) }
    }

    /// Set the logging interval. A zero interval is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// Add to the count, logging once per interval boundary crossed.
    ///
    /// Returns `true` if the new count is a non-zero multiple of the interval.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.get();
        let count = prev + additional;
        self.count.set(count);

        for milestone in (prev / self.interval + 1)..=(count / self.interval) {
            info!("{} {}", self.message, milestone * self.interval);
        }

        count > 0 && count % self.interval == 0
    }

    /// Log the final count unless the last boundary already reported it.
    pub fn log_final(&self) {
        let count = self.count.get();
        if count > 0 && count % self.interval != 0 {
            info!("{} {} (complete)", self.message, count);
        }
    }
}
