//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MotionController (domain)
//! ```
//!
//! Driven adapters (PIR inputs, servo PWM, indicator LEDs, event sinks)
//! implement these traits.  The
//! [`MotionController`](super::service::MotionController) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! None of the ports return errors: a sensor that cannot be read reports
//! "no motion", and actuator faults are logged by the adapter.

use crate::sensors::{DetectionSnapshot, SensorId};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain motion readings.
pub trait SensorPort {
    /// Non-blocking, polarity-corrected sample of one sensor.
    /// `true` = motion present.
    fn read_sensor(&mut self, id: SensorId) -> bool;

    /// Sample all three sensors, in priority order.
    fn read_all(&mut self) -> DetectionSnapshot {
        DetectionSnapshot::sample(|id| self.read_sensor(id))
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the servo and LEDs.
pub trait ActuatorPort {
    /// Set the servo pulse on-time (µs).  Out-of-range values are clamped
    /// by the implementation.
    fn set_pulse_width(&mut self, us: u16);

    /// `true` lights "active" and extinguishes "ready"; `false` is the
    /// inverse.
    fn set_indicator(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
