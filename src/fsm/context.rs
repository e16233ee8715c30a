//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the detection snapshot for the current cycle,
//! the output commands, the hold timer and the configuration.  Think of it
//! as the "blackboard" in a blackboard architecture.

use crate::config::ControllerConfig;
use crate::sensors::{DetectionSnapshot, SensorId};

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Commands that state handlers write to request actuator actions.
/// The service applies these to the hardware every cycle, changed or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCommands {
    /// Servo pulse on-time in microseconds.
    pub pulse_us: u16,
    /// `true` = active LED lit, `false` = ready LED lit.
    pub indicator_active: bool,
}

impl OutputCommands {
    /// Servo centred, ready LED lit.
    pub const fn neutral(config: &ControllerConfig) -> Self {
        Self {
            pulse_us: config.servo.neutral_us,
            indicator_active: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,

    // -- Sensor data --
    /// Readings for this cycle.  Updated before each FSM tick.
    pub detections: DetectionSnapshot,

    // -- Outputs --
    pub commands: OutputCommands,

    // -- Hold --
    /// Sensor the servo is currently pointed at; `None` while ready.
    pub active_sensor: Option<SensorId>,
    /// Time spent in the current hold (ms).  Zero on entering ACTIVE.
    pub hold_elapsed_ms: u32,
    /// Set for exactly one tick when a detection re-armed the hold.
    pub rearmed: bool,

    // -- Configuration --
    pub config: ControllerConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            ticks_in_state: 0,
            detections: DetectionSnapshot::default(),
            commands: OutputCommands::neutral(&config),
            active_sensor: None,
            hold_elapsed_ms: 0,
            rearmed: false,
            config,
        }
    }

    /// Milliseconds elapsed since the current state was entered.
    pub fn ms_in_state(&self) -> u64 {
        self.ticks_in_state * u64::from(self.config.cycle_period_ms)
    }
}
