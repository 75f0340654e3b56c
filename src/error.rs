//! Unified error types for the wind station firmware.
//!
//! A single `Error` enum that every subsystem converts into.  All variants
//! are `Copy` so they can be returned from the query surface without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A wind-speed query was malformed.
    Sensor(SensorError),
    /// Wiring the sensor to the platform (timer, GPIO) failed.
    Init(InitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Averaging horizon (in seconds) is not one of 10, 60 or 3600.
    UnknownHorizon(u32),
    /// Averaging horizon name could not be parsed.
    UnknownHorizonName,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHorizon(secs) => write!(f, "unknown averaging horizon {secs}s"),
            Self::UnknownHorizonName => write!(f, "unknown averaging horizon name"),
        }
    }
}

impl core::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// Errors raised while attaching the sensor to the platform.
///
/// The `i32` payloads carry the raw `esp_err_t` on target; host adapters use
/// `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// `begin()` called on a station that is already running.
    AlreadyStarted,
    /// The periodic sample timer could not be created or started.
    TimerStart(i32),
    /// The pin could not be configured as an edge interrupt source.
    EdgeAttach(i32),
    /// The edge adapter has no free handler slots.
    TooManyPins,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "sensor already started"),
            Self::TimerStart(rc) => write!(f, "periodic timer start failed (rc={rc})"),
            Self::EdgeAttach(rc) => write!(f, "edge interrupt attach failed (rc={rc})"),
            Self::TooManyPins => write!(f, "no free edge handler slot"),
        }
    }
}

impl core::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
