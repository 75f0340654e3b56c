//! Falling-edge interrupt adapter.
//!
//! Implements [`EdgeInterrupt`] for the anemometer pulse input.
//!
//! - **`target_os = "espidf"`**: per-pin GPIO ISR service.  Each handler
//!   is boxed and passed to `gpio_isr_handler_add` as the ISR argument; the
//!   box is freed only after `gpio_isr_handler_remove` has returned.
//! - **`not(target_os = "espidf")`**: a software registry; tests and the
//!   simulator raise edges with [`PlatformEdgeInterrupt::fire`].

use heapless::Vec;

use crate::app::ports::{EdgeFn, EdgeInterrupt};
use crate::error::InitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::{error, info, warn};

/// Maximum number of pins with an attached handler.
const MAX_EDGE_PINS: usize = 4;

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
struct Attached {
    pin: i32,
    /// Leaked `Box<EdgeFn>`; owned by the ISR service while registered.
    handler: *mut EdgeFn,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn edge_trampoline(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the pointer registered in `attach_falling`; it stays
    // valid until `detach` has removed the handler from the ISR service.
    let handler = unsafe { &*(arg as *const EdgeFn) };
    handler();
}

#[cfg(target_os = "espidf")]
#[derive(Default)]
pub struct PlatformEdgeInterrupt {
    attached: Vec<Attached, MAX_EDGE_PINS>,
}

#[cfg(target_os = "espidf")]
impl PlatformEdgeInterrupt {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_os = "espidf")]
impl EdgeInterrupt for PlatformEdgeInterrupt {
    fn attach_falling(&mut self, pin: i32, handler: EdgeFn) -> Result<(), InitError> {
        self.detach(pin);
        if self.attached.is_full() {
            return Err(InitError::TooManyPins);
        }

        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
            ..Default::default()
        };
        // SAFETY: plain register configuration of an input pin; invalid pin
        // numbers are rejected by the driver with ESP_ERR_INVALID_ARG.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(InitError::EdgeAttach(ret));
        }

        // SAFETY: idempotent; ESP_ERR_INVALID_STATE means it was already
        // installed by another driver.
        let ret = unsafe { gpio_install_isr_service(0) };
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(InitError::EdgeAttach(ret));
        }

        let raw = Box::into_raw(Box::new(handler));
        // SAFETY: `raw` outlives the registration (see `detach`).
        let ret = unsafe { gpio_isr_handler_add(pin, Some(edge_trampoline), raw.cast()) };
        if ret != ESP_OK as i32 {
            // SAFETY: registration failed, so the ISR service never saw `raw`.
            drop(unsafe { Box::from_raw(raw) });
            return Err(InitError::EdgeAttach(ret));
        }

        // Capacity was checked above.
        let _ = self.attached.push(Attached { pin, handler: raw });
        info!("gpio: falling-edge handler attached to GPIO{}", pin);
        Ok(())
    }

    fn detach(&mut self, pin: i32) {
        let Some(idx) = self.attached.iter().position(|a| a.pin == pin) else {
            return;
        };
        let attached = self.attached.swap_remove(idx);

        // SAFETY: plain register write on a pin configured in attach_falling.
        let ret = unsafe { gpio_intr_disable(pin) };
        if ret != ESP_OK as i32 {
            warn!("gpio: GPIO{} interrupt disable failed (rc={})", pin, ret);
        }

        // SAFETY: removes the registration made in attach_falling.
        let ret = unsafe { gpio_isr_handler_remove(pin) };
        if ret != ESP_OK as i32 {
            // The ISR service may still dispatch to the handler; leak it.
            error!(
                "gpio: GPIO{} handler remove failed (rc={}), handler leaked",
                pin, ret
            );
            return;
        }
        // SAFETY: the ISR service no longer references the handler.
        drop(unsafe { Box::from_raw(attached.handler) });
        info!("gpio: GPIO{} handler detached", pin);
    }
}

#[cfg(target_os = "espidf")]
impl Drop for PlatformEdgeInterrupt {
    fn drop(&mut self) {
        while let Some(pin) = self.attached.first().map(|a| a.pin) {
            self.detach(pin);
        }
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct PlatformEdgeInterrupt {
    attached: Vec<(i32, EdgeFn), MAX_EDGE_PINS>,
}

#[cfg(not(target_os = "espidf"))]
impl PlatformEdgeInterrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a falling edge on `pin`.  Returns `false` if nothing is
    /// attached to it.
    pub fn fire(&self, pin: i32) -> bool {
        match self.attached.iter().find(|(p, _)| *p == pin) {
            Some((_, handler)) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self, pin: i32) -> bool {
        self.attached.iter().any(|(p, _)| *p == pin)
    }
}

#[cfg(not(target_os = "espidf"))]
impl EdgeInterrupt for PlatformEdgeInterrupt {
    fn attach_falling(&mut self, pin: i32, handler: EdgeFn) -> Result<(), InitError> {
        if !(0..=crate::pins::MAX_INPUT_GPIO).contains(&pin) {
            return Err(InitError::EdgeAttach(-1));
        }
        self.detach(pin);
        self.attached
            .push((pin, handler))
            .map_err(|_| InitError::TooManyPins)?;
        log::info!("gpio(sim): falling-edge handler attached to GPIO{}", pin);
        Ok(())
    }

    fn detach(&mut self, pin: i32) {
        if let Some(idx) = self.attached.iter().position(|(p, _)| *p == pin) {
            drop(self.attached.swap_remove(idx));
            log::info!("gpio(sim): GPIO{} handler detached", pin);
        }
    }
}
