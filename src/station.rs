//! Anemometer lifecycle: wires a [`WindSpeedSensor`] to the platform.
//!
//! `begin()` starts the 1 Hz sample timer and then attaches the falling-edge
//! interrupt; `end()` (or dropping the station) detaches the interrupt and
//! cancels the timer, so no callback outlives the station.
//!
//! ```text
//!  EdgeInterrupt ──ISR──▶ sensor.on_edge(clock.now_millis())
//!  TimerService  ──1 Hz─▶ sensor.sample_tick()
//!  application   ───────▶ sensor.average_speed(h)
//! ```

use std::sync::Arc;

use log::info;

use crate::app::ports::{EdgeInterrupt, MicrosClock, PeriodicTimer, TimerService};
use crate::config::WindConfig;
use crate::error::{InitError, Result};
use crate::sensors::{Horizon, WindSpeedSensor};

/// Resources held while the station is running.
struct Running<T> {
    pin: i32,
    timer: T,
}

/// Owns the platform ports and the shared sensor state.
pub struct Anemometer<S, E, C>
where
    S: TimerService,
    E: EdgeInterrupt,
    C: MicrosClock + Clone + Send + Sync + 'static,
{
    sensor: Arc<WindSpeedSensor>,
    timers: S,
    edges: E,
    clock: C,
    sample_period_ms: u32,
    running: Option<Running<S::Timer>>,
}

impl<S, E, C> Anemometer<S, E, C>
where
    S: TimerService,
    E: EdgeInterrupt,
    C: MicrosClock + Clone + Send + Sync + 'static,
{
    /// Build a stopped station.  The configuration is validated here so that
    /// `begin()` only fails for platform reasons.
    pub fn new(config: &WindConfig, timers: S, edges: E, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sensor: Arc::new(WindSpeedSensor::new(config)),
            timers,
            edges,
            clock,
            sample_period_ms: config.sample_period_ms,
            running: None,
        })
    }

    /// Start sampling: 1 Hz accumulator timer first, then the edge interrupt
    /// on `pin`.  Fails with [`InitError::AlreadyStarted`] if already running.
    pub fn begin(&mut self, pin: i32) -> Result<()> {
        if self.running.is_some() {
            return Err(InitError::AlreadyStarted.into());
        }

        let sensor = Arc::clone(&self.sensor);
        let mut timer = self.timers.every(
            self.sample_period_ms,
            Box::new(move || {
                sensor.sample_tick();
            }),
        )?;

        let sensor = Arc::clone(&self.sensor);
        let clock = self.clock.clone();
        let attached = self.edges.attach_falling(
            pin,
            Box::new(move || {
                sensor.on_edge(clock.now_millis() as u32);
            }),
        );
        if let Err(e) = attached {
            timer.cancel();
            return Err(e.into());
        }

        info!(
            "anemometer: sampling GPIO{} every {}ms",
            pin, self.sample_period_ms
        );
        self.running = Some(Running { pin, timer });
        Ok(())
    }

    /// Detach the edge interrupt and cancel the sample timer.  Safe to call
    /// more than once.
    pub fn end(&mut self) {
        if let Some(mut running) = self.running.take() {
            self.edges.detach(running.pin);
            running.timer.cancel();
            info!("anemometer: GPIO{} detached, sampling stopped", running.pin);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Pin currently attached, if running.
    pub fn pin(&self) -> Option<i32> {
        self.running.as_ref().map(|r| r.pin)
    }

    /// Rolling average wind speed over `horizon`, in m/s.
    pub fn average_speed(&self, horizon: Horizon) -> f32 {
        self.sensor.average_speed(horizon)
    }

    /// Shared sensor state, for readers on other tasks.
    pub fn sensor(&self) -> &Arc<WindSpeedSensor> {
        &self.sensor
    }

    pub fn edges(&self) -> &E {
        &self.edges
    }

    /// Mutable access for edge sources the owner has to drive, such as a
    /// polled input.
    pub fn edges_mut(&mut self) -> &mut E {
        &mut self.edges
    }

    pub fn timers(&self) -> &S {
        &self.timers
    }
}

impl<S, E, C> Drop for Anemometer<S, E, C>
where
    S: TimerService,
    E: EdgeInterrupt,
    C: MicrosClock + Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.end();
    }
}
