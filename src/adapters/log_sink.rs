//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing wind reports to the ESP-IDF logger
//! (UART / USB-CDC in production).  An HTTP or MQTT adapter would implement
//! the same trait.

use log::info;

use crate::app::events::WindReport;
use crate::app::ports::ReportSink;

/// Adapter that logs every [`WindReport`] to the serial console.
#[derive(Debug, Default)]
pub struct LogReportSink {
    emitted: u32,
}

impl LogReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports written so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, report: &WindReport) {
        self.emitted = self.emitted.wrapping_add(1);
        info!(
            "WIND | avg10={:.2} avg60={:.2} avg3600={:.2} m/s | now={:.2} gust={:.2} m/s | tick={}",
            report.avg_10s,
            report.avg_60s,
            report.avg_3600s,
            report.instantaneous,
            report.gust,
            report.ticks,
        );
    }
}
