//! Platform clock adapter.
//!
//! Implements [`MicrosClock`] for the weather station.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic,
//!   placed in IRAM so it is callable from an ISR).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.

use crate::app::ports::MicrosClock;

/// Monotonic clock for the current platform.  Cheap to clone; every clone
/// shares the same epoch.
#[derive(Debug, Clone, Copy)]
pub struct PlatformClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for PlatformClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl MicrosClock for PlatformClock {
    /// Microseconds since boot.
    #[cfg(target_os = "espidf")]
    fn now_micros(&self) -> u64 {
        // SAFETY: esp_timer_get_time only reads the systimer counter.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since the clock was created.
    #[cfg(not(target_os = "espidf"))]
    fn now_micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}
