//! Mock hardware for integration tests.
//!
//! Two levels of mock:
//!
//! - [`MockHardware`] implements the port traits directly and records every
//!   actuator call, for tests of the controller alone.
//! - [`MockInput`], [`MockOutput`] and [`MockPwm`] implement the
//!   embedded-hal traits, for tests that run the real drivers and
//!   [`HardwareAdapter`](motionservo::adapters::hardware::HardwareAdapter).
//!   Each keeps its state behind an `Rc` so the test can still poke and
//!   observe it after the pin has been moved into a driver.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use motionservo::app::events::AppEvent;
use motionservo::app::ports::{ActuatorPort, EventSink, SensorPort};
use motionservo::sensors::SensorId;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetPulse { us: u16 },
    SetIndicator { active: bool },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Current sensor levels, indexed by `SensorId::index()`.
    pub motion: [bool; SensorId::COUNT],
    pub calls: Vec<ActuatorCall>,
    pub reads: Vec<SensorId>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            motion: [false; SensorId::COUNT],
            calls: Vec::new(),
            reads: Vec::new(),
        }
    }

    pub fn set_motion(&mut self, sensor: SensorId, present: bool) {
        self.motion[sensor.index()] = present;
    }

    pub fn clear_motion(&mut self) {
        self.motion = [false; SensorId::COUNT];
    }

    /// Most recent pulse width written.
    pub fn pulse_us(&self) -> Option<u16> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetPulse { us } => Some(*us),
            ActuatorCall::SetIndicator { .. } => None,
        })
    }

    /// Most recent indicator state written.
    pub fn indicator_active(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetIndicator { active } => Some(*active),
            ActuatorCall::SetPulse { .. } => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_sensor(&mut self, id: SensorId) -> bool {
        self.reads.push(id);
        self.motion[id.index()]
    }
}

impl ActuatorPort for MockHardware {
    fn set_pulse_width(&mut self, us: u16) {
        self.calls.push(ActuatorCall::SetPulse { us });
    }

    fn set_indicator(&mut self, active: bool) {
        self.calls.push(ActuatorCall::SetIndicator { active });
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Accumulates requested delay instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

// ── embedded-hal pins ─────────────────────────────────────────

/// Input pin whose level the test controls through a shared handle.
pub struct MockInput(pub Rc<Cell<bool>>);

impl MockInput {
    /// A low pin and the handle that drives it.
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(false));
        (Self(Rc::clone(&level)), level)
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// Output pin whose level the test observes through a shared handle.
pub struct MockOutput(pub Rc<Cell<bool>>);

impl MockOutput {
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(false));
        (Self(Rc::clone(&level)), level)
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

// ── embedded-hal PWM ──────────────────────────────────────────

/// Shared view of a [`MockPwm`]: last duty written and write count.
#[derive(Default)]
pub struct PwmProbe {
    pub duty: Cell<u16>,
    pub writes: Cell<usize>,
}

pub struct MockPwm {
    max: u16,
    probe: Rc<PwmProbe>,
}

impl MockPwm {
    pub fn new(max: u16) -> (Self, Rc<PwmProbe>) {
        let probe = Rc::new(PwmProbe::default());
        (
            Self {
                max,
                probe: Rc::clone(&probe),
            },
            probe,
        )
    }
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.probe.duty.set(duty);
        self.probe.writes.set(self.probe.writes.get() + 1);
        Ok(())
    }
}
