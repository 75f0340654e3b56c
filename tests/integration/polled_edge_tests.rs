//! `Anemometer` driven by a polled input pin instead of the GPIO ISR.

use windstation::config::WindConfig;
use windstation::drivers::PolledEdgeInterrupt;
use windstation::{Anemometer, Horizon};

use crate::mock_hw::{ManualClock, ManualTimerService, ScriptedPin};

type PolledStation =
    Anemometer<ManualTimerService, PolledEdgeInterrupt<ScriptedPin>, ManualClock>;

fn polled_station(pin: ScriptedPin) -> (PolledStation, ManualTimerService, ManualClock) {
    let timers = ManualTimerService::new();
    let clock = ManualClock::new();
    let station = Anemometer::new(
        &WindConfig::default(),
        timers.clone(),
        PolledEdgeInterrupt::new(4, pin),
        clock.clone(),
    )
    .unwrap();
    (station, timers, clock)
}

/// Poll `n` times, `step_ms` apart.
fn poll_for(station: &mut PolledStation, clock: &ManualClock, n: usize, step_ms: u64) {
    for _ in 0..n {
        clock.advance_millis(step_ms);
        station.edges_mut().poll().unwrap();
    }
}

#[test]
fn polled_edges_reach_the_rings() {
    let (mut station, timers, clock) = polled_station(ScriptedPin::square(4));
    station.begin(4).unwrap();
    clock.set_millis(1_000);

    poll_for(&mut station, &clock, 8, 5);
    assert_eq!(station.sensor().pending_pulses(), 4);

    timers.fire();
    assert_eq!(station.sensor().pulses(Horizon::TenSeconds), 4);
    assert!((station.average_speed(Horizon::TenSeconds) - 4.0 * 0.33 / 10.0).abs() < 1e-4);
}

#[test]
fn polled_edges_are_debounced() {
    // Edges on polls 2, 4 and 6: 2 ms apart at a 1 ms poll step.
    let (mut station, timers, clock) = polled_station(ScriptedPin::square(3));
    station.begin(4).unwrap();
    clock.set_millis(1_000);

    poll_for(&mut station, &clock, 6, 1);
    timers.fire();

    // Edge at +2 ms accepted, +4 ms is 2 ms later (bounce), +6 ms is 4 ms later.
    assert_eq!(station.sensor().pulses(Horizon::TenSeconds), 2);
}

#[test]
fn polling_before_begin_or_after_end_counts_nothing() {
    let (mut station, timers, clock) = polled_station(ScriptedPin::square(6));
    clock.set_millis(1_000);

    poll_for(&mut station, &clock, 4, 10);
    station.begin(4).unwrap();
    poll_for(&mut station, &clock, 4, 10);
    station.end();
    poll_for(&mut station, &clock, 4, 10);

    assert!(!station.edges().is_attached());
    assert_eq!(station.edges().edges(), 6);
    assert_eq!(station.sensor().pending_pulses(), 2);
    assert_eq!(timers.active(), 0);
}

#[test]
fn begin_on_another_pin_fails_and_stops_the_timer() {
    let (mut station, timers, _clock) = polled_station(ScriptedPin::square(1));
    assert!(station.begin(5).is_err());
    assert!(!station.is_running());
    assert_eq!(timers.active(), 0);
}
