//! Cup anemometer wind-speed sensor.
//!
//! One falling edge per rotation unit.  The edge ISR debounces and counts
//! pulses; a 1 Hz timer drains the count into three nested rings; the
//! application queries rolling averages at any time.
//!
//! ```text
//!  edge ISR ──▶ EdgeDebouncer ──▶ PulseCounter
//!                                      │ drain (1 Hz)
//!                                      ▼
//!          10 × 1 s ──wrap──▶ 6 × 10 s ──wrap──▶ 60 × 60 s
//!             │                  │                   │
//!             └──────── average_speed(horizon) ──────┘
//! ```
//!
//! The longer horizons are zero-filled until they have seen a full window,
//! so for the first 60 s / 3600 s after boot they under-report.

use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{debug, trace, warn};

use super::debounce::EdgeDebouncer;
use super::pulse_counter::PulseCounter;
use super::window::PulseWindow;
use crate::app::events::WindReport;
use crate::config::WindConfig;
use crate::error::SensorError;

// ═══════════════════════════════════════════════════════════════
//  Averaging horizons
// ═══════════════════════════════════════════════════════════════

/// Time span a rolling average covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    TenSeconds,
    OneMinute,
    OneHour,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Self::TenSeconds, Self::OneMinute, Self::OneHour];

    /// Duration in seconds.
    pub const fn secs(self) -> u32 {
        match self {
            Self::TenSeconds => 10,
            Self::OneMinute => 60,
            Self::OneHour => 3600,
        }
    }

    /// Map a raw duration to a horizon.  Anything other than 10, 60 or 3600
    /// is a caller bug and is rejected rather than averaged as zero.
    pub fn from_secs(secs: u32) -> Result<Self, SensorError> {
        match secs {
            10 => Ok(Self::TenSeconds),
            60 => Ok(Self::OneMinute),
            3600 => Ok(Self::OneHour),
            other => Err(SensorError::UnknownHorizon(other)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TenSeconds => "10s",
            Self::OneMinute => "60s",
            Self::OneHour => "3600s",
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = SensorError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl FromStr for Horizon {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "10s" => Ok(Self::TenSeconds),
            "60s" => Ok(Self::OneMinute),
            "3600s" => Ok(Self::OneHour),
            _ => Err(SensorError::UnknownHorizonName),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Interval accumulator
// ═══════════════════════════════════════════════════════════════

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pulses refused by the full counter since the previous tick.  Only
    /// [`WindSpeedSensor::sample_tick`] fills this in.
    pub dropped_pulses: u32,
    /// Set when the 10 s ring completed and its sum was pushed to the 60 s ring.
    pub ten_second_sum: Option<u32>,
    /// Set when the 60 s ring completed and its sum was pushed to the 3600 s ring.
    pub minute_sum: Option<u32>,
}

/// Three nested rings fed with one pulse count per second.
///
/// Single writer: only the sample timer may call [`tick`](Self::tick).
#[derive(Default)]
pub struct WindAccumulator {
    /// 10 × 1 s pulse counts.
    seconds: PulseWindow<10>,
    /// 6 × 10 s sums.
    ten_seconds: PulseWindow<6>,
    /// 60 × 60 s sums.
    minutes: PulseWindow<60>,
}

impl WindAccumulator {
    pub const fn new() -> Self {
        Self {
            seconds: PulseWindow::new(),
            ten_seconds: PulseWindow::new(),
            minutes: PulseWindow::new(),
        }
    }

    /// Fold one second's pulse count into the rings.
    pub fn tick(&self, count: u32) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.seconds.push(count) {
            let sum10 = self.seconds.sum();
            outcome.ten_second_sum = Some(sum10);

            if self.ten_seconds.push(sum10) {
                let sum60 = self.ten_seconds.sum();
                outcome.minute_sum = Some(sum60);
                self.minutes.push(sum60);
            }
        }

        outcome
    }

    /// Raw pulse total currently held for `horizon`.
    pub fn pulses(&self, horizon: Horizon) -> u32 {
        match horizon {
            Horizon::TenSeconds => self.seconds.sum(),
            Horizon::OneMinute => self.ten_seconds.sum(),
            Horizon::OneHour => self.minutes.sum(),
        }
    }

    /// Pulses counted in the most recent one-second sample.
    pub fn last_second(&self) -> u32 {
        self.seconds.latest()
    }

    /// Largest one-second sample in the 10 s ring.
    pub fn peak_second(&self) -> u32 {
        self.seconds.max()
    }

    pub fn seconds(&self) -> &PulseWindow<10> {
        &self.seconds
    }

    pub fn ten_seconds(&self) -> &PulseWindow<6> {
        &self.ten_seconds
    }

    pub fn minutes(&self) -> &PulseWindow<60> {
        &self.minutes
    }
}

// ═══════════════════════════════════════════════════════════════
//  Sensor
// ═══════════════════════════════════════════════════════════════

/// Shared wind-speed state, touched from three contexts:
///
/// | Method                       | Context            |
/// |------------------------------|--------------------|
/// | [`on_edge`](Self::on_edge)   | edge ISR           |
/// | [`sample_tick`](Self::sample_tick) | 1 Hz timer   |
/// | everything else              | application        |
///
/// Nothing here blocks, so the sensor can be shared by `Arc` between the
/// ISR closure, the timer closure and the application.
pub struct WindSpeedSensor {
    counter: PulseCounter,
    debouncer: EdgeDebouncer,
    accumulator: WindAccumulator,
    /// m/s per pulse/s.
    calibration: f32,
    ticks: AtomicU32,
    /// Overflow tally as of the previous tick.
    overflow_seen: AtomicU32,
    reports: Signal<CriticalSectionRawMutex, WindReport>,
}

impl WindSpeedSensor {
    pub fn new(config: &WindConfig) -> Self {
        Self {
            counter: PulseCounter::new(config.pulse_capacity),
            debouncer: EdgeDebouncer::new(config.debounce_ms),
            accumulator: WindAccumulator::new(),
            calibration: config.meters_per_second_per_hz,
            ticks: AtomicU32::new(0),
            overflow_seen: AtomicU32::new(0),
            reports: Signal::new(),
        }
    }

    // ── ISR context ───────────────────────────────────────────

    /// Handle one falling edge seen at `now_ms`.  Bounce inside the debounce
    /// window is dropped silently.  Returns whether a pulse was counted.
    pub fn on_edge(&self, now_ms: u32) -> bool {
        self.debouncer.accept(now_ms) && self.counter.record_pulse()
    }

    // ── Timer context ─────────────────────────────────────────

    /// Drain the pulse counter and fold the count into the rings, then
    /// publish a fresh [`WindReport`].
    pub fn sample_tick(&self) -> TickOutcome {
        let count = self.counter.drain_count();
        let mut outcome = self.accumulator.tick(count);
        let overflowed = self.counter.overflowed();
        let previous = self.overflow_seen.swap(overflowed, Ordering::Relaxed);
        outcome.dropped_pulses = overflowed.wrapping_sub(previous);
        let ticks = self.ticks.fetch_add(1, Ordering::Relaxed).wrapping_add(1);

        trace!("wind: tick {} pulses={}", ticks, count);
        if outcome.dropped_pulses > 0 {
            warn!(
                "wind: pulse counter saturated at {} ({} dropped this tick)",
                count, outcome.dropped_pulses
            );
        }
        if let Some(sum10) = outcome.ten_second_sum {
            debug!(
                "wind: 10s window complete, {} pulses ({:.2} m/s)",
                sum10,
                self.speed_from_pulses(sum10, Horizon::TenSeconds)
            );
        }
        if let Some(sum60) = outcome.minute_sum {
            debug!(
                "wind: 60s window complete, {} pulses ({:.2} m/s)",
                sum60,
                self.speed_from_pulses(sum60, Horizon::OneMinute)
            );
        }

        self.reports.signal(self.report());
        outcome
    }

    // ── Application context ───────────────────────────────────

    /// Rolling average wind speed over `horizon`, in m/s.
    pub fn average_speed(&self, horizon: Horizon) -> f32 {
        self.speed_from_pulses(self.accumulator.pulses(horizon), horizon)
    }

    /// Rolling average for a horizon given in seconds.  Fails for anything
    /// other than 10, 60 or 3600.
    pub fn average_speed_secs(&self, secs: u32) -> Result<f32, SensorError> {
        Horizon::from_secs(secs).map(|h| self.average_speed(h))
    }

    /// Raw pulse total held for `horizon`.
    pub fn pulses(&self, horizon: Horizon) -> u32 {
        self.accumulator.pulses(horizon)
    }

    /// Speed over the most recent one-second sample, in m/s.
    pub fn instantaneous_speed(&self) -> f32 {
        self.accumulator.last_second() as f32 * self.calibration
    }

    /// Highest one-second speed inside the 10 s window, in m/s.
    pub fn gust_speed(&self) -> f32 {
        self.accumulator.peak_second() as f32 * self.calibration
    }

    /// Snapshot of every reading.
    pub fn report(&self) -> WindReport {
        WindReport {
            avg_10s: self.average_speed(Horizon::TenSeconds),
            avg_60s: self.average_speed(Horizon::OneMinute),
            avg_3600s: self.average_speed(Horizon::OneHour),
            instantaneous: self.instantaneous_speed(),
            gust: self.gust_speed(),
            ticks: self.ticks(),
        }
    }

    /// Take the report published by the last tick, if not taken yet.
    pub fn take_report(&self) -> Option<WindReport> {
        self.reports.try_take()
    }

    /// Wait for the next published report.
    pub async fn next_report(&self) -> WindReport {
        self.reports.wait().await
    }

    /// Accumulator ticks processed since construction.
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Pulses dropped because the counter was at capacity.
    pub fn overflowed_pulses(&self) -> u32 {
        self.counter.overflowed()
    }

    /// Pulses counted since the last tick.
    pub fn pending_pulses(&self) -> u32 {
        self.counter.pending()
    }

    pub fn accumulator(&self) -> &WindAccumulator {
        &self.accumulator
    }

    fn speed_from_pulses(&self, pulses: u32, horizon: Horizon) -> f32 {
        pulses as f32 * self.calibration / horizon.secs() as f32
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
