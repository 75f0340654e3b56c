//! End-to-end run on the host platform adapters: real sample thread,
//! monotonic clock and the simulated GPIO registry.

use std::thread::sleep;
use std::time::Duration;

use windstation::adapters::{
    LogReportSink, PlatformClock, PlatformEdgeInterrupt, PlatformTimerService,
};
use windstation::app::ports::ReportSink;
use windstation::config::WindConfig;
use windstation::{Anemometer, Horizon};

use crate::mock_hw::RecordingSink;

fn host_station(
    config: &WindConfig,
) -> Anemometer<PlatformTimerService, PlatformEdgeInterrupt, PlatformClock> {
    Anemometer::new(
        config,
        PlatformTimerService::new().unwrap(),
        PlatformEdgeInterrupt::new(),
        PlatformClock::new(),
    )
    .unwrap()
}

#[test]
fn simulated_pulses_reach_the_ten_second_window() {
    let config = WindConfig {
        sample_period_ms: 50,
        ..WindConfig::default()
    };
    let mut station = host_station(&config);
    station.begin(4).unwrap();

    for _ in 0..6 {
        assert!(station.edges().fire(4));
        sleep(Duration::from_millis(5));
    }
    // Several sample periods; every pulse has been drained by now.
    sleep(Duration::from_millis(200));

    let sensor = station.sensor().clone();
    assert_eq!(sensor.pending_pulses(), 0);
    assert_eq!(sensor.pulses(Horizon::TenSeconds), 6);
    assert!(sensor.ticks() >= 2);
    assert!((station.average_speed(Horizon::TenSeconds) - 6.0 * 0.33 / 10.0).abs() < 1e-4);

    station.end();
    assert!(!station.edges().is_attached(4));
    let ticks = sensor.ticks();
    sleep(Duration::from_millis(120));
    assert_eq!(sensor.ticks(), ticks);
}

#[test]
fn pin_without_input_capability_fails_cleanly() {
    let mut station = host_station(&WindConfig::default());
    assert!(station.begin(48).is_err());
    assert!(!station.is_running());
    station.begin(4).unwrap();
    assert_eq!(station.pin(), Some(4));
}

#[test]
fn published_reports_flow_into_sinks() {
    let config = WindConfig {
        sample_period_ms: 20,
        ..WindConfig::default()
    };
    let mut station = host_station(&config);
    station.begin(4).unwrap();
    sleep(Duration::from_millis(100));
    station.end();

    let report = station.sensor().take_report().expect("a tick published a report");
    assert!(report.ticks >= 1);

    let mut log_sink = LogReportSink::new();
    let mut recorder = RecordingSink::default();
    log_sink.emit(&report);
    recorder.emit(&report);
    assert_eq!(log_sink.emitted(), 1);
    assert_eq!(recorder.reports, vec![report]);
}
