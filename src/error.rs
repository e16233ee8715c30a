//! Hardware-boundary fault types for the MotionServo firmware.
//!
//! The control core has no error path: sensor reads are booleans and pulse
//! widths are clamped.  Faults can only happen where a driver touches a pin
//! or a PWM channel, and there they are logged and absorbed so the loop
//! keeps running.  `Error` gives those log lines one vocabulary.

use core::fmt;

use crate::sensors::SensorId;

/// A fault observed at the hardware boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A PIR input pin could not be read.
    Sensor(SensorId),
    /// An indicator LED pin could not be driven.
    Indicator,
    /// The servo PWM channel rejected a duty write.
    Pwm,
    /// Peripheral bring-up failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(id) => write!(f, "sensor {id}: read failed"),
            Self::Indicator => write!(f, "indicator: pin write failed"),
            Self::Pwm => write!(f, "servo pwm: duty write failed"),
            Self::Init(what) => write!(f, "init: {what}"),
        }
    }
}
