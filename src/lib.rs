//! Weather station wind-speed firmware library.
//!
//! Exposes the measurement core and its platform adapters for integration
//! testing and for the HTTP layer that serves the readings.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]` within
//! each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod clock;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
pub mod station;

pub use error::{Error, InitError, Result, SensorError};
pub use sensors::{Horizon, WindSpeedSensor};
pub use station::Anemometer;
