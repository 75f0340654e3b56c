//! Edge debounce for the anemometer reed contact.
//!
//! A reed switch closing under a spinning cup magnet bounces for a
//! millisecond or two, producing several falling edges per real pulse.
//! The filter accepts an edge only if more than `threshold_ms` have passed
//! since the last accepted one.
//!
//! The state lives in an atomic so the ISR can update it through a shared
//! reference; only the ISR writes it.

use core::sync::atomic::{AtomicU32, Ordering};

pub struct EdgeDebouncer {
    /// Timestamp (ms, truncated to 32 bits) of the last accepted edge.
    last_accepted_ms: AtomicU32,
    threshold_ms: u32,
}

impl EdgeDebouncer {
    pub const fn new(threshold_ms: u32) -> Self {
        Self {
            last_accepted_ms: AtomicU32::new(0),
            threshold_ms,
        }
    }

    /// Decide whether the edge seen at `now_ms` is a real pulse.
    ///
    /// Wrapping subtraction keeps the filter working across the 49.7-day
    /// wrap of the truncated timestamp.
    pub fn accept(&self, now_ms: u32) -> bool {
        let last = self.last_accepted_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) > self.threshold_ms {
            self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}
