//! Outbound wind-speed reports.
//!
//! The sensor publishes one [`WindReport`] per accumulator tick.  The
//! application takes the latest one and hands it to a
//! [`ReportSink`](super::ports::ReportSink); the HTTP collaborator can
//! serialise it directly.

use serde::Serialize;

/// Point-in-time wind readings, all in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindReport {
    /// Rolling 10 s average.
    pub avg_10s: f32,
    /// Rolling 60 s average.
    pub avg_60s: f32,
    /// Rolling 3600 s average.
    pub avg_3600s: f32,
    /// Speed over the last one-second sample.
    pub instantaneous: f32,
    /// Highest one-second speed inside the 10 s window.
    pub gust: f32,
    /// Accumulator ticks since the sensor was created.
    pub ticks: u32,
}
