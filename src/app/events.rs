//! Outbound application events.
//!
//! The [`MotionController`](super::service::MotionController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them (the firmware logs them).

use crate::fsm::StateId;
use crate::sensors::SensorId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A detection moved the servo; `pulse_us` is the commanded target.
    Activated { sensor: SensorId, pulse_us: u16 },

    /// A detection during a hold restarted the hold timer.
    HoldRearmed { sensor: SensorId },

    /// The hold expired and the servo returned to neutral.
    Released { sensor: SensorId, held_ms: u64 },
}
