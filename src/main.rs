//! WeatherStation Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  PlatformEdgeInterrupt  PlatformTimerService  PlatformClock  │
//! │  (GPIO ISR service)     (esp_timer, 1 Hz)     (esp_timer µs) │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │   Anemometer ─▶ WindSpeedSensor (debounce · rings)     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  LogReportSink (serial)                                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{debug, info};

use windstation::adapters::{
    LogReportSink, PlatformClock, PlatformEdgeInterrupt, PlatformTimerService,
};
use windstation::app::ports::ReportSink;
use windstation::config::WindConfig;
use windstation::{Anemometer, Horizon};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("WeatherStation wind sensor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = WindConfig::default();

    // ── 3. Wire the sensor to the platform ────────────────────
    let mut station = Anemometer::new(
        &config,
        PlatformTimerService::new()?,
        PlatformEdgeInterrupt::new(),
        PlatformClock::new(),
    )?;
    station.begin(config.pulse_gpio)?;

    // ── 4. Report loop ────────────────────────────────────────
    let sensor = Arc::clone(station.sensor());
    let mut sink = LogReportSink::new();
    let interval = Duration::from_secs(u64::from(config.report_interval_secs));

    loop {
        std::thread::sleep(interval);

        let Some(report) = sensor.take_report() else {
            continue;
        };
        sink.emit(&report);
        if let Ok(json) = serde_json::to_string(&report) {
            debug!("wind json: {}", json);
        }
        if sensor.overflowed_pulses() > 0 {
            debug!(
                "wind: {} pulses dropped at capacity, 1h avg {:.2} m/s",
                sensor.overflowed_pulses(),
                sensor.average_speed(Horizon::OneHour)
            );
        }
    }
}
