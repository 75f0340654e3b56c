//! Integration tests for the `Anemometer` begin → sample → teardown cycle.

use windstation::config::WindConfig;
use windstation::error::{Error, InitError};
use windstation::{Anemometer, Horizon};

use crate::mock_hw::{EdgeCall, ManualClock, ManualTimerService, MockEdgeInterrupt};

type TestStation = Anemometer<ManualTimerService, MockEdgeInterrupt, ManualClock>;

struct Rig {
    station: TestStation,
    timers: ManualTimerService,
    edges: MockEdgeInterrupt,
    clock: ManualClock,
}

fn rig() -> Rig {
    rig_with(&WindConfig::default())
}

fn rig_with(config: &WindConfig) -> Rig {
    let timers = ManualTimerService::new();
    let edges = MockEdgeInterrupt::new();
    let clock = ManualClock::new();
    let station = Anemometer::new(config, timers.clone(), edges.clone(), clock.clone()).unwrap();
    Rig {
        station,
        timers,
        edges,
        clock,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn begin_starts_one_hertz_timer_and_attaches_pin() {
    let mut r = rig();
    assert!(!r.station.is_running());

    r.station.begin(4).unwrap();

    assert!(r.station.is_running());
    assert_eq!(r.station.pin(), Some(4));
    assert_eq!(r.timers.periods(), vec![1000]);
    assert_eq!(r.timers.active(), 1);
    assert_eq!(r.edges.calls(), vec![EdgeCall::Attach(4)]);
}

#[test]
fn five_pulses_ten_ms_apart_then_one_tick() {
    let mut r = rig();
    r.station.begin(4).unwrap();

    r.clock.set_millis(1_000);
    for _ in 0..5 {
        assert!(r.edges.edge(4));
        r.clock.advance_millis(10);
    }
    assert_eq!(r.station.sensor().pending_pulses(), 5);

    r.timers.fire();

    assert_eq!(r.station.sensor().pending_pulses(), 0);
    assert_eq!(r.station.sensor().pulses(Horizon::TenSeconds), 5);
    assert!(approx(r.station.average_speed(Horizon::TenSeconds), 0.165));
}

#[test]
fn second_edge_one_ms_later_is_debounced() {
    let mut r = rig();
    r.station.begin(4).unwrap();

    r.clock.set_millis(5_000);
    r.edges.edge(4);
    r.clock.advance_millis(1);
    r.edges.edge(4);
    r.timers.fire();

    assert_eq!(r.station.sensor().pulses(Horizon::TenSeconds), 1);
}

#[test]
fn clock_is_sampled_in_microseconds() {
    let mut r = rig();
    r.station.begin(4).unwrap();

    // 3.999ms after the first edge truncates to 3ms: still bounce.
    r.clock.set_millis(2_000);
    r.edges.edge(4);
    r.clock.advance_micros(3_999);
    r.edges.edge(4);
    r.clock.advance_micros(1);
    r.edges.edge(4);

    assert_eq!(r.station.sensor().pending_pulses(), 2);
}

#[test]
fn begin_twice_is_rejected() {
    let mut r = rig();
    r.station.begin(4).unwrap();
    assert_eq!(r.station.begin(5), Err(Error::Init(InitError::AlreadyStarted)));
    assert_eq!(r.timers.active(), 1);
    assert_eq!(r.station.pin(), Some(4));
}

#[test]
fn end_detaches_interrupt_and_cancels_timer() {
    let mut r = rig();
    r.station.begin(4).unwrap();

    r.station.end();

    assert!(!r.station.is_running());
    assert_eq!(r.timers.active(), 0);
    assert_eq!(r.timers.cancelled(), 1);
    assert_eq!(r.edges.calls(), vec![EdgeCall::Attach(4), EdgeCall::Detach(4)]);
    assert!(!r.edges.edge(4));
    assert_eq!(r.timers.fire(), 0);

    // Second end() is a no-op.
    r.station.end();
    assert_eq!(r.edges.calls().len(), 2);
}

#[test]
fn drop_cancels_the_periodic_callback() {
    let r = rig();
    let Rig {
        mut station,
        timers,
        edges,
        ..
    } = r;
    station.begin(4).unwrap();

    drop(station);

    assert_eq!(timers.active(), 0);
    assert_eq!(timers.fire(), 0);
    assert!(!edges.is_attached(4));
}

#[test]
fn failed_attach_rolls_back_timer() {
    let mut r = rig();
    r.edges.reject_pin(34);

    let err = r.station.begin(34).unwrap_err();

    assert_eq!(err, Error::Init(InitError::EdgeAttach(0x102)));
    assert!(!r.station.is_running());
    assert_eq!(r.timers.active(), 0);
    assert_eq!(r.timers.cancelled(), 1);

    // A capable pin still works afterwards.
    r.station.begin(4).unwrap();
    assert_eq!(r.timers.active(), 1);
}

#[test]
fn failed_timer_start_attaches_nothing() {
    let mut r = rig();
    r.timers.fail_next_start();

    assert_eq!(r.station.begin(4), Err(Error::Init(InitError::TimerStart(-1))));
    assert!(r.edges.calls().is_empty());
    assert!(!r.station.is_running());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = WindConfig {
        sample_period_ms: 0,
        ..WindConfig::default()
    };
    let result = Anemometer::new(
        &config,
        ManualTimerService::new(),
        MockEdgeInterrupt::new(),
        ManualClock::new(),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn restart_after_end_keeps_accumulated_history() {
    let mut r = rig();
    r.station.begin(4).unwrap();
    r.clock.set_millis(1_000);
    r.edges.edge(4);
    r.timers.fire();
    r.station.end();

    r.station.begin(4).unwrap();
    r.clock.advance_millis(100);
    r.edges.edge(4);
    r.timers.fire();

    assert_eq!(r.station.sensor().pulses(Horizon::TenSeconds), 2);
    assert_eq!(r.station.sensor().ticks(), 2);
}

#[test]
fn custom_sample_period_is_passed_to_timer() {
    let config = WindConfig {
        sample_period_ms: 250,
        ..WindConfig::default()
    };
    let mut r = rig_with(&config);
    r.station.begin(4).unwrap();
    assert_eq!(r.timers.periods(), vec![250]);
}
