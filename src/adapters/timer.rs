//! Periodic timer adapter.
//!
//! Implements [`TimerService`] for the accumulator's 1 Hz sample tick.
//!
//! - **`target_os = "espidf"`**: `esp_timer` with task dispatch, so the
//!   callback runs in the ESP timer task (not ISR) and may log.
//! - **`not(target_os = "espidf")`**: one thread per timer, woken by
//!   `recv_timeout`; dropping the channel sender cancels it immediately.

use crate::app::ports::{PeriodicTimer, TickFn, TimerService};
use crate::error::InitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

#[cfg(not(target_os = "espidf"))]
use std::sync::mpsc;
#[cfg(not(target_os = "espidf"))]
use std::thread::JoinHandle;

use core::time::Duration;

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct PlatformTimerService {
    service: EspTaskTimerService,
}

#[cfg(target_os = "espidf")]
impl PlatformTimerService {
    pub fn new() -> Result<Self, InitError> {
        let service = EspTaskTimerService::new().map_err(|e| InitError::TimerStart(e.code()))?;
        Ok(Self { service })
    }
}

#[cfg(target_os = "espidf")]
impl TimerService for PlatformTimerService {
    type Timer = PlatformTimer;

    fn every(&mut self, period_ms: u32, tick: TickFn) -> Result<PlatformTimer, InitError> {
        let timer = self
            .service
            .timer(tick)
            .map_err(|e| InitError::TimerStart(e.code()))?;
        timer
            .every(Duration::from_millis(u64::from(period_ms)))
            .map_err(|e| InitError::TimerStart(e.code()))?;
        log::info!("timer: periodic {}ms started", period_ms);
        Ok(PlatformTimer { timer: Some(timer) })
    }
}

#[cfg(target_os = "espidf")]
pub struct PlatformTimer {
    timer: Option<EspTimer<'static>>,
}

#[cfg(target_os = "espidf")]
impl PeriodicTimer for PlatformTimer {
    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            if let Err(e) = timer.cancel() {
                log::error!("timer: cancel failed ({})", e);
            }
        }
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct PlatformTimerService;

#[cfg(not(target_os = "espidf"))]
impl PlatformTimerService {
    pub fn new() -> Result<Self, InitError> {
        Ok(Self)
    }
}

#[cfg(not(target_os = "espidf"))]
impl TimerService for PlatformTimerService {
    type Timer = PlatformTimer;

    fn every(&mut self, period_ms: u32, mut tick: TickFn) -> Result<PlatformTimer, InitError> {
        let period = Duration::from_millis(u64::from(period_ms));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::Builder::new()
            .name("sample-timer".into())
            .spawn(move || {
                // Any message or a dropped sender ends the loop.
                while let Err(mpsc::RecvTimeoutError::Timeout) = stop_rx.recv_timeout(period) {
                    tick();
                }
            })
            .map_err(|_| InitError::TimerStart(-1))?;

        log::info!("timer(sim): periodic {}ms started", period_ms);
        Ok(PlatformTimer {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }
}

#[cfg(not(target_os = "espidf"))]
pub struct PlatformTimer {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

#[cfg(not(target_os = "espidf"))]
impl PeriodicTimer for PlatformTimer {
    fn cancel(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("timer(sim): tick callback panicked");
            }
        }
    }
}

impl Drop for PlatformTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
