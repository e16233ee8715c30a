//! Hardware adapter bridging real peripherals to domain port traits.
//!
//! Owns the [`PirBank`], the [`IndicatorPair`] and the servo
//! [`FrameGenerator`], exposing them through [`SensorPort`] and
//! [`ActuatorPort`].  Generic over the embedded-hal pin and PWM types, so
//! the same adapter runs on ESP-IDF drivers and on host-side mocks.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::indicator::IndicatorPair;
use crate::drivers::servo_pwm::FrameGenerator;
use crate::sensors::pir::PirBank;
use crate::sensors::SensorId;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O, P> {
    sensors: PirBank<I>,
    indicators: IndicatorPair<O>,
    servo: FrameGenerator<P>,
}

impl<I, O, P> HardwareAdapter<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    pub fn new(sensors: PirBank<I>, indicators: IndicatorPair<O>, servo: FrameGenerator<P>) -> Self {
        Self {
            sensors,
            indicators,
            servo,
        }
    }

    pub fn servo(&self) -> &FrameGenerator<P> {
        &self.servo
    }

    pub fn indicators(&self) -> &IndicatorPair<O> {
        &self.indicators
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, P> SensorPort for HardwareAdapter<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    fn read_sensor(&mut self, id: SensorId) -> bool {
        self.sensors.read(id)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, O, P> ActuatorPort for HardwareAdapter<I, O, P>
where
    I: InputPin,
    O: OutputPin,
    P: SetDutyCycle,
{
    fn set_pulse_width(&mut self, us: u16) {
        self.servo.set_pulse_width(us);
    }

    fn set_indicator(&mut self, active: bool) {
        self.indicators.set(active);
    }
}
