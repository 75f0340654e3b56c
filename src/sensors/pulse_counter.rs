//! Interrupt-safe bounded pulse counter.
//!
//! The edge ISR increments the count; the 1 Hz sample timer reads and
//! clears it in one atomic swap, so a pulse landing during the drain is
//! counted either in this second or the next, never both or neither.
//!
//! The counter saturates at its capacity the way a counting semaphore
//! refuses further gives.  Refused pulses are tallied separately so a
//! mis-sized capacity shows up in diagnostics instead of silently capping
//! the wind speed.

use core::sync::atomic::{AtomicU32, Ordering};

/// Bounded pulse counter shared between ISR and timer context.
pub struct PulseCounter {
    count: AtomicU32,
    overflowed: AtomicU32,
    capacity: u32,
}

impl PulseCounter {
    pub const fn new(capacity: u32) -> Self {
        Self {
            count: AtomicU32::new(0),
            overflowed: AtomicU32::new(0),
            capacity,
        }
    }

    /// Count one pulse.  Interrupt context only.
    ///
    /// Lock-free; the CAS retry loop can only spin if the timer drains in
    /// between, which happens at most once per drain.  Returns `false` when
    /// the counter is full and the pulse was dropped.
    pub fn record_pulse(&self) -> bool {
        let capacity = self.capacity;
        let accepted = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |c| {
                (c < capacity).then_some(c + 1)
            })
            .is_ok();
        if !accepted {
            self.overflowed.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    /// Read the accumulated count and reset it to zero.  Timer context only.
    pub fn drain_count(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Current count without draining.
    pub fn pending(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Pulses dropped because the counter was full, since construction.
    pub fn overflowed(&self) -> u32 {
        self.overflowed.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
