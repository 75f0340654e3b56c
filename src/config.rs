//! System configuration parameters
//!
//! All tunable parameters for the wind-speed subsystem.  Values are compiled
//! in; there is no persistent store.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Wind-speed sensor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    // --- Hardware ---
    /// GPIO the anemometer pulse line is wired to
    pub pulse_gpio: i32,

    // --- Pulse capture ---
    /// Edges arriving within this many milliseconds of the last accepted
    /// pulse are treated as contact bounce
    pub debounce_ms: u32,
    /// Maximum pulses buffered between two drains
    pub pulse_capacity: u32,

    // --- Calibration ---
    /// Wind speed in m/s produced by one pulse per second
    pub meters_per_second_per_hz: f32,

    // --- Timing ---
    /// Accumulator sample period (milliseconds)
    pub sample_period_ms: u32,
    /// Report logging interval (seconds)
    pub report_interval_secs: u32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            pulse_gpio: pins::WIND_SPEED_GPIO,

            debounce_ms: 3,
            pulse_capacity: 500,

            meters_per_second_per_hz: 0.33,

            sample_period_ms: 1000, // 1 Hz
            report_interval_secs: 10,
        }
    }
}

impl WindConfig {
    /// Reject values the sensor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(0..=pins::MAX_INPUT_GPIO).contains(&self.pulse_gpio) {
            return Err(Error::Config("pulse_gpio out of range"));
        }
        if self.pulse_capacity == 0 {
            return Err(Error::Config("pulse_capacity must be non-zero"));
        }
        if !(self.meters_per_second_per_hz > 0.0) {
            return Err(Error::Config("calibration must be positive"));
        }
        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample_period_ms must be non-zero"));
        }
        Ok(())
    }
}
