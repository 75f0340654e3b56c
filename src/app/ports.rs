//! Port traits: the boundary between the wind-speed core and the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Anemometer (domain)
//! ```
//!
//! Platform adapters (ESP timer, GPIO ISR service, high-resolution clock,
//! log output) implement these traits.  The [`Anemometer`](crate::station::Anemometer)
//! consumes them via generics, so the sensor logic never touches hardware
//! directly and runs unchanged against the mocks in `tests/integration/`.

use crate::clock;
use crate::error::InitError;

use super::events::WindReport;

// ───────────────────────────────────────────────────────────────
// Clock port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Free-running monotonic microsecond counter.
///
/// `now_micros` must be callable from interrupt context.
pub trait MicrosClock {
    fn now_micros(&self) -> u64;

    /// Milliseconds since the counter's epoch, without hardware division.
    fn now_millis(&self) -> u64 {
        clock::micros_to_millis(self.now_micros())
    }
}

// ───────────────────────────────────────────────────────────────
// Timer port (scheduler capability injected into the domain)
// ───────────────────────────────────────────────────────────────

/// Callback run by a periodic timer, outside interrupt context.
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// A running periodic timer.  Cancelling stops future invocations; a
/// callback already in flight may still complete.
pub trait PeriodicTimer {
    fn cancel(&mut self);
}

/// Creates periodic timers.
pub trait TimerService {
    type Timer: PeriodicTimer;

    /// Invoke `tick` every `period_ms` milliseconds until the returned timer
    /// is cancelled.
    fn every(&mut self, period_ms: u32, tick: TickFn) -> Result<Self::Timer, InitError>;
}

// ───────────────────────────────────────────────────────────────
// Edge interrupt port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Handler executed in interrupt context on every falling edge.  Must not
/// block or allocate.
pub type EdgeFn = Box<dyn Fn() + Send + Sync + 'static>;

/// Attaches falling-edge interrupt handlers to input pins.
pub trait EdgeInterrupt {
    /// Configure `pin` as an input and run `handler` on every falling edge.
    ///
    /// Adapters report pins without interrupt capability as
    /// [`InitError::EdgeAttach`].
    fn attach_falling(&mut self, pin: i32, handler: EdgeFn) -> Result<(), InitError>;

    /// Remove the handler from `pin`.  No-op if nothing is attached.
    fn detach(&mut self, pin: i32);
}

// ───────────────────────────────────────────────────────────────
// Report sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Where [`WindReport`]s go once the application has taken them from the
/// sensor (serial log, HTTP cache, MQTT, ...).
pub trait ReportSink {
    fn emit(&mut self, report: &WindReport);
}
