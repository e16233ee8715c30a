//! Integration tests for the MotionController → FSM → ports pipeline.
//!
//! These drive the controller cycle by cycle against [`MockHardware`] and
//! check the full command history, without any real hardware.

use super::mock_hw::{ActuatorCall, MockDelay, MockHardware, RecordingSink};

use motionservo::app::events::AppEvent;
use motionservo::app::service::{ControllerState, MotionController};
use motionservo::config::{ControllerConfig, HoldPolicy};
use motionservo::fsm::StateId;
use motionservo::sensors::SensorId;

fn make_controller(config: ControllerConfig) -> (MotionController, MockHardware, RecordingSink) {
    let mut ctl = MotionController::new(config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    ctl.start(&mut hw, &mut sink);
    (ctl, hw, sink)
}

fn standard() -> (MotionController, MockHardware, RecordingSink) {
    make_controller(ControllerConfig::standard())
}

#[test]
fn start_is_ready_and_neutral() {
    let (ctl, hw, sink) = standard();
    assert_eq!(ctl.state(), ControllerState::Ready);
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::SetPulse { us: 1500 },
            ActuatorCall::SetIndicator { active: false },
        ]
    );
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Ready)]);
}

#[test]
fn every_cycle_samples_all_three_sensors_in_priority_order() {
    let (mut ctl, mut hw, mut sink) = standard();
    ctl.tick(&mut hw, &mut sink);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(
        hw.reads,
        vec![
            SensorId::Left,
            SensorId::Center,
            SensorId::Right,
            SensorId::Left,
            SensorId::Center,
            SensorId::Right,
        ]
    );
}

#[test]
fn center_holds_for_exactly_one_hundred_cycles() {
    let (mut ctl, mut hw, mut sink) = standard();

    hw.set_motion(SensorId::Center, true);
    ctl.tick(&mut hw, &mut sink);
    hw.clear_motion();

    let mut cycles_active = 1;
    while ctl.state_id() == StateId::Active {
        ctl.tick(&mut hw, &mut sink);
        if ctl.state_id() == StateId::Active {
            cycles_active += 1;
        }
        assert!(cycles_active <= 1000, "hold never expired");
    }

    assert_eq!(cycles_active, 100);
    assert_eq!(ctl.cycle_count(), 101);
    assert_eq!(ctl.state(), ControllerState::Ready);
    assert_eq!(hw.pulse_us(), Some(1500));
    assert_eq!(hw.indicator_active(), Some(false));
}

#[test]
fn hold_elapsed_advances_by_cycle_period() {
    let (mut ctl, mut hw, mut sink) = standard();
    hw.set_motion(SensorId::Right, true);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(
        ctl.state(),
        ControllerState::Active {
            sensor: SensorId::Right,
            hold_elapsed_ms: 0
        }
    );

    for _ in 0..10 {
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(
        ctl.state(),
        ControllerState::Active {
            sensor: SensorId::Right,
            hold_elapsed_ms: 500
        }
    );
}

#[test]
fn simultaneous_left_and_right_selects_left() {
    let (mut ctl, mut hw, mut sink) = standard();
    hw.set_motion(SensorId::Left, true);
    hw.set_motion(SensorId::Right, true);
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(
        ctl.state(),
        ControllerState::Active {
            sensor: SensorId::Left,
            hold_elapsed_ms: 0
        }
    );
    assert_eq!(hw.pulse_us(), Some(1000));
    assert_eq!(ctl.activations(SensorId::Left), 1);
    assert_eq!(ctl.activations(SensorId::Right), 0);
}

#[test]
fn one_cycle_of_left_points_servo_at_min() {
    let (mut ctl, mut hw, mut sink) = standard();
    hw.set_motion(SensorId::Left, true);
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(
        &hw.calls[2..],
        &[
            ActuatorCall::SetPulse { us: 1000 },
            ActuatorCall::SetIndicator { active: true },
        ]
    );
}

#[test]
fn outputs_are_reasserted_identically_each_cycle() {
    let (mut ctl, mut hw, mut sink) = standard();
    for _ in 0..5 {
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.calls.len(), 12);
    for pair in hw.calls.chunks(2) {
        assert_eq!(
            pair,
            &[
                ActuatorCall::SetPulse { us: 1500 },
                ActuatorCall::SetIndicator { active: false },
            ]
        );
    }

    hw.set_motion(SensorId::Right, true);
    ctl.tick(&mut hw, &mut sink);
    let before = hw.calls.len();
    for _ in 0..5 {
        ctl.tick(&mut hw, &mut sink);
    }
    for pair in hw.calls[before..].chunks(2) {
        assert_eq!(
            pair,
            &[
                ActuatorCall::SetPulse { us: 2000 },
                ActuatorCall::SetIndicator { active: true },
            ]
        );
    }
}

#[test]
fn fixed_hold_ignores_other_sensors_until_release() {
    let (mut ctl, mut hw, mut sink) = standard();
    hw.set_motion(SensorId::Right, true);
    ctl.tick(&mut hw, &mut sink);

    hw.clear_motion();
    hw.set_motion(SensorId::Left, true);
    for _ in 0..99 {
        ctl.tick(&mut hw, &mut sink);
        assert_eq!(hw.pulse_us(), Some(2000));
    }

    // Expiry cycle: LEFT is still present, so it takes over directly.
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(
        ctl.state(),
        ControllerState::Active {
            sensor: SensorId::Left,
            hold_elapsed_ms: 0
        }
    );
    assert_eq!(hw.pulse_us(), Some(1000));
    assert_eq!(ctl.activations(SensorId::Left), 1);
    assert_eq!(ctl.activations(SensorId::Right), 1);
}

#[test]
fn continuous_motion_never_drives_neutral() {
    let (mut ctl, mut hw, mut sink) = standard();
    let after_start = hw.calls.len();
    hw.set_motion(SensorId::Left, true);
    for _ in 0..3 * ctl.config().hold_cycles() {
        ctl.tick(&mut hw, &mut sink);
    }

    assert!(hw.calls[after_start..].iter().all(|call| matches!(
        call,
        ActuatorCall::SetPulse { us: 1000 } | ActuatorCall::SetIndicator { active: true }
    )));
    assert_eq!(ctl.state_id(), StateId::Active);
    assert_eq!(ctl.activations(SensorId::Left), 3);
    assert!(!sink.events.iter().any(|e| matches!(
        e,
        AppEvent::StateChanged {
            to: StateId::Ready,
            ..
        }
    )));
}

#[test]
fn full_hold_emits_activation_and_release_events() {
    let (mut ctl, mut hw, mut sink) = standard();
    hw.set_motion(SensorId::Center, true);
    ctl.tick(&mut hw, &mut sink);
    hw.clear_motion();
    for _ in 0..100 {
        ctl.tick(&mut hw, &mut sink);
    }

    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started(StateId::Ready),
            AppEvent::StateChanged {
                from: StateId::Ready,
                to: StateId::Active
            },
            AppEvent::Activated {
                sensor: SensorId::Center,
                pulse_us: 1500
            },
            AppEvent::StateChanged {
                from: StateId::Active,
                to: StateId::Ready
            },
            AppEvent::Released {
                sensor: SensorId::Center,
                held_ms: 5000
            },
        ]
    );
}

#[test]
fn rearm_policy_extends_the_hold_and_retargets() {
    let (mut ctl, mut hw, mut sink) = make_controller(ControllerConfig {
        hold_policy: HoldPolicy::Rearm,
        ..ControllerConfig::standard()
    });

    hw.set_motion(SensorId::Right, true);
    ctl.tick(&mut hw, &mut sink);
    hw.clear_motion();
    for _ in 0..60 {
        ctl.tick(&mut hw, &mut sink);
    }

    hw.set_motion(SensorId::Center, true);
    ctl.tick(&mut hw, &mut sink);
    hw.clear_motion();
    assert_eq!(
        ctl.state(),
        ControllerState::Active {
            sensor: SensorId::Center,
            hold_elapsed_ms: 0
        }
    );
    assert_eq!(hw.pulse_us(), Some(1500));
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::HoldRearmed {
            sensor: SensorId::Center
        })
    );

    // A full hold from the re-arm point, not from the first detection.
    for _ in 0..99 {
        ctl.tick(&mut hw, &mut sink);
        assert_eq!(ctl.state_id(), StateId::Active);
    }
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.state(), ControllerState::Ready);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Released {
            sensor: SensorId::Center,
            held_ms: 8050
        })
    );
}

#[test]
fn shorter_hold_configuration() {
    let (mut ctl, mut hw, mut sink) = make_controller(ControllerConfig {
        hold_duration_ms: 1000,
        cycle_period_ms: 100,
        ..ControllerConfig::standard()
    });
    hw.set_motion(SensorId::Left, true);
    ctl.tick(&mut hw, &mut sink);
    hw.clear_motion();

    for _ in 0..9 {
        ctl.tick(&mut hw, &mut sink);
    }
    assert_eq!(ctl.state_id(), StateId::Active);
    ctl.tick(&mut hw, &mut sink);
    assert_eq!(ctl.state_id(), StateId::Ready);
}

#[test]
fn sleep_waits_one_cycle_period() {
    let (ctl, _, _) = standard();
    let mut delay = MockDelay::default();
    ctl.sleep_until_next_cycle(&mut delay);
    ctl.sleep_until_next_cycle(&mut delay);
    assert_eq!(delay.total_ns, 2 * 50 * 1_000_000);
}
