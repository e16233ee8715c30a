//! PIR motion sensor input driver.
//!
//! HC-SR501-style modules drive a digital output for as long as they see
//! motion (plus their own on-board retrigger time).  Most drive it HIGH;
//! open-collector variants pull it LOW and need the MCU pull-up.  The
//! [`Polarity`] folds that difference away so everything above this module
//! sees `true` = motion.
//!
//! A failed pin read is logged and reported as "no motion": a broken input
//! must not pin the servo to one side.

use embedded_hal::digital::InputPin;
use log::warn;

use super::SensorId;
use crate::error::Error;

/// Logic level that means "motion present".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Map a raw pin level to "motion present".
    pub const fn is_motion(self, level_high: bool) -> bool {
        match self {
            Self::ActiveHigh => level_high,
            Self::ActiveLow => !level_high,
        }
    }
}

/// One PIR sensor on one input pin.
pub struct PirSensor<I> {
    id: SensorId,
    pin: I,
    polarity: Polarity,
}

impl<I: InputPin> PirSensor<I> {
    pub fn new(id: SensorId, pin: I, polarity: Polarity) -> Self {
        Self { id, pin, polarity }
    }

    /// Non-blocking sample of the sensor output.
    pub fn motion(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => self.polarity.is_motion(level),
            Err(e) => {
                warn!("{}: {:?}", Error::Sensor(self.id), e);
                false
            }
        }
    }
}

/// The left/centre/right sensor trio.
pub struct PirBank<I> {
    sensors: [PirSensor<I>; SensorId::COUNT],
}

impl<I: InputPin> PirBank<I> {
    /// Build the bank from three pins sharing one polarity.
    pub fn new(left: I, center: I, right: I, polarity: Polarity) -> Self {
        Self {
            sensors: [
                PirSensor::new(SensorId::Left, left, polarity),
                PirSensor::new(SensorId::Center, center, polarity),
                PirSensor::new(SensorId::Right, right, polarity),
            ],
        }
    }

    /// Sample a single sensor.
    pub fn read(&mut self, id: SensorId) -> bool {
        self.sensors[id.index()].motion()
    }
}
