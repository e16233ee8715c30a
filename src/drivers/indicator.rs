//! Ready/active indicator LED pair.
//!
//! Green = ready (idle, servo neutral), red = active (holding a detected
//! position).  Exactly one is lit at a time: the driver always extinguishes
//! the outgoing LED before lighting the incoming one, so there is no
//! instant where both are on.
//!
//! Both LEDs are driven on every call even when the state is unchanged,
//! which repairs a pin that was disturbed since the last cycle.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::Error;

pub struct IndicatorPair<O> {
    ready: O,
    active: O,
    showing_active: bool,
}

impl<O: OutputPin> IndicatorPair<O> {
    /// Take both pins and show "ready".
    pub fn new(ready: O, active: O) -> Self {
        let mut pair = Self {
            ready,
            active,
            showing_active: false,
        };
        pair.set(false);
        pair
    }

    /// `true` lights the active LED and extinguishes ready; `false` is the
    /// inverse.
    pub fn set(&mut self, active: bool) {
        let (off, on) = if active {
            (&mut self.ready, &mut self.active)
        } else {
            (&mut self.active, &mut self.ready)
        };
        if let Err(e) = off.set_low() {
            warn!("{}: {:?}", Error::Indicator, e);
        }
        if let Err(e) = on.set_high() {
            warn!("{}: {:?}", Error::Indicator, e);
        }
        self.showing_active = active;
    }

    /// Last commanded state.
    pub fn is_active(&self) -> bool {
        self.showing_active
    }

    /// Give the pins back as `(ready, active)`.
    pub fn release(self) -> (O, O) {
        (self.ready, self.active)
    }
}
