//! Sensor subsystem: the wind-speed measurement chain.
//!
//! | Module          | Runs in        | Role                                |
//! |-----------------|----------------|-------------------------------------|
//! | `debounce`      | edge ISR       | reject reed-contact bounce          |
//! | `pulse_counter` | ISR / timer    | bounded lock-free pulse count       |
//! | `window`        | timer / app    | fixed ring of per-interval samples  |
//! | `wind_speed`    | all three      | nested averaging + speed queries    |

pub mod debounce;
pub mod pulse_counter;
pub mod window;
pub mod wind_speed;

pub use wind_speed::{Horizon, TickOutcome, WindAccumulator, WindSpeedSensor};
