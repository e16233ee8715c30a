//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers without closures or
//! dynamic dispatch.  This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  READY ──[any sensor, LEFT > CENTER > RIGHT]──▶ ACTIVE(s, 0)
//!    ▲                                               │
//!    │                                      [hold + Δ < HOLD]
//!    │                                               ▼
//!    │                                       ACTIVE(s, hold + Δ)
//!    │                                               │
//!    └───────[hold + Δ ≥ HOLD, no motion]────────────┘
//!
//!  Expiry with motion: ACTIVE ──[hold + Δ ≥ HOLD, any sensor]──▶ ACTIVE(s', 0)
//!  Rearm policy: ACTIVE ──[any sensor]──▶ ACTIVE(s', 0)
//! ```

use super::context::{FsmContext, OutputCommands};
use super::{StateDescriptor, StateId};
use crate::config::HoldPolicy;
use crate::sensors::SensorId;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Ready
        StateDescriptor {
            name: "Ready",
            on_enter: Some(ready_enter),
            on_exit: None,
            on_update: ready_update,
        },
        // Index 1: Active
        StateDescriptor {
            name: "Active",
            on_enter: Some(active_enter),
            on_exit: Some(active_exit),
            on_update: active_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  READY state
// ═══════════════════════════════════════════════════════════════════════════

fn ready_enter(ctx: &mut FsmContext) {
    ctx.active_sensor = None;
    ctx.hold_elapsed_ms = 0;
    ctx.rearmed = false;
    ctx.commands = OutputCommands::neutral(&ctx.config);
    info!("READY: servo neutral, watching for motion");
}

fn ready_update(ctx: &mut FsmContext) -> Option<StateId> {
    if let Some(sensor) = ctx.detections.highest_priority() {
        if ctx.detections.count() > 1 {
            debug!(
                "READY: {} sensors fired, {} wins arbitration",
                ctx.detections.count(),
                sensor
            );
        }
        ctx.active_sensor = Some(sensor);
        return Some(StateId::Active);
    }

    ctx.commands = OutputCommands::neutral(&ctx.config);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ACTIVE state: servo pointed at the detecting sensor for the hold
// ═══════════════════════════════════════════════════════════════════════════

/// Entered with `active_sensor` already set by the arbitrating update.
fn active_enter(ctx: &mut FsmContext) {
    ctx.hold_elapsed_ms = 0;
    ctx.rearmed = false;
    if let Some(sensor) = ctx.active_sensor {
        point_at(ctx, sensor);
        info!(
            "ACTIVE: motion {} -> {} us, holding {} ms",
            sensor, ctx.commands.pulse_us, ctx.config.hold_duration_ms
        );
    }
}

fn active_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.rearmed = false;

    if ctx.config.hold_policy == HoldPolicy::Rearm {
        if let Some(sensor) = ctx.detections.highest_priority() {
            ctx.active_sensor = Some(sensor);
            ctx.hold_elapsed_ms = 0;
            ctx.rearmed = true;
            point_at(ctx, sensor);
            debug!("ACTIVE: re-armed by {}", sensor);
            return None;
        }
    }

    let next = ctx
        .hold_elapsed_ms
        .saturating_add(ctx.config.cycle_period_ms);
    if next >= ctx.config.hold_duration_ms {
        if let Some(sensor) = ctx.active_sensor {
            info!("ACTIVE: hold on {} expired after {} ms", sensor, ctx.ms_in_state());
        }
        // Motion still present: straight into a new hold, no neutral cycle.
        if let Some(sensor) = ctx.detections.highest_priority() {
            ctx.active_sensor = Some(sensor);
            return Some(StateId::Active);
        }
        return Some(StateId::Ready);
    }

    ctx.hold_elapsed_ms = next;
    if let Some(sensor) = ctx.active_sensor {
        point_at(ctx, sensor);
    }
    None
}

fn active_exit(ctx: &mut FsmContext) {
    debug!("ACTIVE: leaving after {} ticks", ctx.ticks_in_state);
}

/// Servo at the sensor's target, active LED lit.
fn point_at(ctx: &mut FsmContext, sensor: SensorId) {
    ctx.commands = OutputCommands {
        pulse_us: ctx.config.servo.target_for(sensor),
        indicator_active: true,
    };
}
