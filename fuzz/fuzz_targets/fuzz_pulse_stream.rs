//! Fuzz target: edge/tick interleavings into `WindSpeedSensor`
//!
//! Each input byte is either a tick (0xFF) or an edge after a delay of
//! `byte` milliseconds.  Checks that accepted pulses are never lost or
//! invented and that averages stay finite and non-negative.
//!
//! cargo fuzz run fuzz_pulse_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use windstation::config::WindConfig;
use windstation::{Horizon, WindSpeedSensor};

fuzz_target!(|data: &[u8]| {
    let config = WindConfig {
        pulse_capacity: 64,
        ..WindConfig::default()
    };
    let sensor = WindSpeedSensor::new(&config);

    let mut now_ms: u32 = u32::MAX - 1000;
    let mut accepted: u64 = 0;
    let mut drained: u64 = 0;
    for &byte in data {
        if byte == 0xFF {
            sensor.sample_tick();
            drained += u64::from(sensor.accumulator().last_second());
            continue;
        }
        now_ms = now_ms.wrapping_add(u32::from(byte));
        if sensor.on_edge(now_ms) {
            accepted += 1;
        }
    }
    sensor.sample_tick();
    drained += u64::from(sensor.accumulator().last_second());

    // Every recorded pulse is drained by exactly one tick.
    assert_eq!(drained, accepted);
    assert_eq!(sensor.pending_pulses(), 0);

    for h in Horizon::ALL {
        let v = sensor.average_speed(h);
        assert!(v.is_finite() && v >= 0.0);
    }
});
