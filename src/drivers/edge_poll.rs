//! Polled falling-edge capture.
//!
//! For boards where the anemometer ends up on a pin without interrupt
//! capability, or for bench rigs driving the sensor from a logic-level
//! source.  [`PolledEdgeInterrupt`] implements [`EdgeInterrupt`], so an
//! `Anemometer` can use it in place of the GPIO ISR adapter; the owner then
//! calls [`PolledEdgeInterrupt::poll`] from its loop and detected edges run
//! the attached handler, debounce included.
//!
//! The poll rate must be well above twice the highest pulse rate, or edges
//! are missed.

use embedded_hal::digital::InputPin;

use crate::app::ports::{EdgeFn, EdgeInterrupt};
use crate::error::InitError;

pub struct FallingEdgeDetector<P: InputPin> {
    pin: P,
    /// Level at the previous poll; `None` until the first sample.
    last_high: Option<bool>,
    edges: u32,
}

impl<P: InputPin> FallingEdgeDetector<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_high: None,
            edges: 0,
        }
    }

    /// Sample the pin once.  Returns `true` on a high→low transition.
    ///
    /// The first sample only records the level; a pin that starts low does
    /// not produce an edge.
    pub fn poll(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        let falling = self.last_high == Some(true) && !high;
        self.last_high = Some(high);
        if falling {
            self.edges = self.edges.wrapping_add(1);
        }
        Ok(falling)
    }

    /// Falling edges seen since construction.
    pub fn edges(&self) -> u32 {
        self.edges
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

/// [`EdgeInterrupt`] backed by a polled input pin.
pub struct PolledEdgeInterrupt<P: InputPin> {
    gpio: i32,
    detector: FallingEdgeDetector<P>,
    handler: Option<EdgeFn>,
}

impl<P: InputPin> PolledEdgeInterrupt<P> {
    /// `gpio` is the pin number `attach_falling` must be called with.
    pub fn new(gpio: i32, pin: P) -> Self {
        Self {
            gpio,
            detector: FallingEdgeDetector::new(pin),
            handler: None,
        }
    }

    /// Sample the pin once and run the attached handler on a falling edge.
    /// Edges seen while nothing is attached are dropped.
    pub fn poll(&mut self) -> Result<bool, P::Error> {
        let falling = self.detector.poll()?;
        if falling {
            if let Some(handler) = &self.handler {
                handler();
            }
        }
        Ok(falling)
    }

    pub fn is_attached(&self) -> bool {
        self.handler.is_some()
    }

    /// Falling edges seen since construction, attached or not.
    pub fn edges(&self) -> u32 {
        self.detector.edges()
    }
}

impl<P: InputPin> EdgeInterrupt for PolledEdgeInterrupt<P> {
    fn attach_falling(&mut self, pin: i32, handler: EdgeFn) -> Result<(), InitError> {
        if pin != self.gpio {
            return Err(InitError::EdgeAttach(-1));
        }
        self.handler = Some(handler);
        log::info!("edge_poll: polling GPIO{} for falling edges", pin);
        Ok(())
    }

    fn detach(&mut self, pin: i32) {
        if pin == self.gpio && self.handler.take().is_some() {
            log::info!("edge_poll: GPIO{} polling stopped", pin);
        }
    }
}
