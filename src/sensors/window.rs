//! Fixed-size ring of pulse samples.
//!
//! Single writer (the sample timer), any number of readers.  Each slot and
//! the cursor are separate atomics: a reader racing a `push` may see the new
//! sample with the old cursor or vice versa, which skews one sum for at most
//! one tick.  Nothing here can block the writer.

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

pub struct PulseWindow<const N: usize> {
    slots: [AtomicU32; N],
    /// Next slot to overwrite; always in `0..N`.
    cursor: AtomicUsize,
}

impl<const N: usize> Default for PulseWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PulseWindow<N> {
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU32::new(0) }; N],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Overwrite the oldest slot with `sample`.
    ///
    /// Returns `true` when the cursor wrapped back to slot 0, i.e. the window
    /// now holds `N` samples written since the previous wrap.
    pub fn push(&self, sample: u32) -> bool {
        let cursor = self.cursor.load(Ordering::Relaxed);
        self.slots[cursor].store(sample, Ordering::Relaxed);
        let next = if cursor + 1 == N { 0 } else { cursor + 1 };
        self.cursor.store(next, Ordering::Release);
        next == 0
    }

    /// Sum of all slots.
    pub fn sum(&self) -> u32 {
        self.slots
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.load(Ordering::Relaxed)))
    }

    /// Largest sample currently held.
    pub fn max(&self) -> u32 {
        self.slots
            .iter()
            .map(|s| s.load(Ordering::Relaxed))
            .max()
            .unwrap_or(0)
    }

    /// Most recently written sample.
    pub fn latest(&self) -> u32 {
        let cursor = self.cursor.load(Ordering::Acquire);
        let idx = if cursor == 0 { N - 1 } else { cursor - 1 };
        self.slots[idx].load(Ordering::Relaxed)
    }

    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Samples ordered oldest to newest.
    pub fn chronological(&self) -> [u32; N] {
        let cursor = self.cursor.load(Ordering::Acquire);
        core::array::from_fn(|i| self.slots[(cursor + i) % N].load(Ordering::Relaxed))
    }
}
