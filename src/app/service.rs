//! Application service, the hexagonal core.
//!
//! [`MotionController`] owns the FSM and its shared context.  It exposes a
//! clean, hardware-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire controller testable with
//! mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │    MotionController    │
//! ActuatorPort ◀──│  FSM · hold · counters │
//!                 └────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::ControllerConfig;
use crate::fsm::context::{FsmContext, OutputCommands};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::SensorId;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// Observable state
// ───────────────────────────────────────────────────────────────

/// Controller state as seen from outside: READY, or ACTIVE pointed at a
/// sensor with the hold time accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Ready,
    Active { sensor: SensorId, hold_elapsed_ms: u32 },
}

// ───────────────────────────────────────────────────────────────
// MotionController
// ───────────────────────────────────────────────────────────────

/// Per-cycle orchestrator: sensors → arbitration → servo and indicators.
pub struct MotionController {
    fsm: Fsm,
    ctx: FsmContext,
    cycle_count: u64,
    /// READY → ACTIVE entries, indexed by [`SensorId::index`].
    activations: [u32; SensorId::COUNT],
    /// Cycle on which the current hold began.
    active_since: u64,
}

impl MotionController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    /// `config` must satisfy [`ControllerConfig::is_valid`].
    pub fn new(config: ControllerConfig) -> Self {
        debug_assert!(config.is_valid(), "invalid controller config: {config:?}");
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Ready);

        Self {
            fsm,
            ctx,
            cycle_count: 0,
            activations: [0; SensorId::COUNT],
            active_since: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter READY and drive the neutral outputs.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_outputs(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "MotionController started in {:?} (hold {} ms, cycle {} ms, {:?})",
            self.fsm.current_state(),
            self.ctx.config.hold_duration_ms,
            self.ctx.config.cycle_period_ms,
            self.ctx.config.hold_policy
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: read sensors → FSM → outputs → events.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.cycle_count += 1;
        let prev_state = self.fsm.current_state();
        let prev_sensor = self.ctx.active_sensor;

        // 1. Sample all three sensors
        self.ctx.detections = hw.read_all();

        // 2. FSM tick (pure state logic)
        let entered = self.fsm.tick(&mut self.ctx);

        // 3. Re-assert outputs, changed or not
        self.apply_outputs(hw);

        // 4. Events
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        if prev_state == StateId::Active && entered.is_some() {
            if let Some(sensor) = prev_sensor {
                let held_ms = (self.cycle_count - self.active_since)
                    * u64::from(self.ctx.config.cycle_period_ms);
                sink.emit(&AppEvent::Released { sensor, held_ms });
            }
        }

        match (entered, self.ctx.active_sensor) {
            (Some(StateId::Active), Some(sensor)) => {
                self.activations[sensor.index()] += 1;
                self.active_since = self.cycle_count;
                sink.emit(&AppEvent::Activated {
                    sensor,
                    pulse_us: self.ctx.commands.pulse_us,
                });
            }
            (None, Some(sensor)) if self.ctx.rearmed => {
                sink.emit(&AppEvent::HoldRearmed { sensor });
            }
            _ => {}
        }

        debug!(
            "cycle {}: {:?} -> {:?}",
            self.cycle_count,
            self.ctx.detections,
            self.state()
        );
    }

    /// The single bounded suspension between cycles.
    pub fn sleep_until_next_cycle(&self, delay: &mut impl DelayNs) {
        delay.delay_ms(self.ctx.config.cycle_period_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        match (self.fsm.current_state(), self.ctx.active_sensor) {
            (StateId::Active, Some(sensor)) => ControllerState::Active {
                sensor,
                hold_elapsed_ms: self.ctx.hold_elapsed_ms,
            },
            _ => ControllerState::Ready,
        }
    }

    /// Current FSM state.
    pub fn state_id(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Outputs applied on the last cycle.
    pub fn commands(&self) -> OutputCommands {
        self.ctx.commands
    }

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// How many times `sensor` moved the controller out of READY.
    pub fn activations(&self, sensor: SensorId) -> u32 {
        self.activations[sensor.index()]
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate FSM output commands into port calls.
    fn apply_outputs(&self, hw: &mut impl ActuatorPort) {
        let cmds = &self.ctx.commands;
        hw.set_pulse_width(cmds.pulse_us);
        hw.set_indicator(cmds.indicator_active);
    }
}
