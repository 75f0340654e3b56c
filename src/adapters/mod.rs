//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements     | Connects to                      |
//! |------------|----------------|----------------------------------|
//! | `gpio`     | EdgeInterrupt  | ESP32 GPIO ISR service           |
//! | `log_sink` | ReportSink     | Serial log output                |
//! | `time`     | MicrosClock    | ESP32 high-resolution timer      |
//! | `timer`    | TimerService   | esp_timer (task dispatch)        |
//!
//! Every adapter has a host implementation behind
//! `not(target_os = "espidf")` for tests and simulation.

pub mod gpio;
pub mod log_sink;
pub mod time;
pub mod timer;

pub use gpio::PlatformEdgeInterrupt;
pub use log_sink::LogReportSink;
pub use time::PlatformClock;
pub use timer::PlatformTimerService;
