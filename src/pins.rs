//! GPIO pin assignments for the weather station main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors: Digital / Pulse
// ---------------------------------------------------------------------------

/// Cup anemometer reed contact: one falling edge per rotation unit,
/// interrupt-driven.  Needs an interrupt-capable input.
pub const WIND_SPEED_GPIO: i32 = 4;

/// Highest GPIO number on the ESP32 that can be used as an input.
pub const MAX_INPUT_GPIO: i32 = 39;
