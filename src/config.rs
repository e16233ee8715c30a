//! System configuration parameters
//!
//! Every tunable in the MotionServo firmware is a compile-time constant.
//! [`ControllerConfig`] bundles the subset the motion controller consumes so
//! tests can exercise alternative values without touching the constants.
//!
//! Timing constants describe the *reference timebase* in which servo
//! compare counts are expressed: a 16 MHz clock divided by 8 feeding a
//! 16-bit counter, giving 40 000 counts per 20 ms frame.  Hardware with a
//! different PWM resolution receives the same duty fraction (see
//! [`FrameGenerator`](crate::drivers::servo_pwm::FrameGenerator)).

use crate::drivers::servo_pwm::{FrameTiming, PulseRange};
use crate::sensors::pir::Polarity;

// ---------------------------------------------------------------------------
// PWM reference timebase
// ---------------------------------------------------------------------------

/// Reference timer clock (Hz).
pub const CLOCK_HZ: u32 = 16_000_000;
/// Clock divider feeding the frame counter.
pub const PRESCALER: u32 = 8;
/// Servo frame rate (Hz).  Hobby servos expect 50 Hz (20 ms frames).
pub const FRAME_RATE_HZ: u32 = 50;
/// Width of the frame counter (bits).
pub const COUNTER_BITS: u32 = 16;
/// Clock dividers the reference timer offers, smallest first.
pub const PRESCALER_CHOICES: [u32; 5] = [1, 8, 64, 256, 1024];

/// Frame timing derived from the reference timebase.
pub const REFERENCE_TIMING: FrameTiming = FrameTiming::new(CLOCK_HZ, PRESCALER, FRAME_RATE_HZ);

// ---------------------------------------------------------------------------
// Servo pulse widths
// ---------------------------------------------------------------------------

/// Full-left pulse width (µs).
pub const SERVO_MIN_US: u16 = 1000;
/// Neutral / centre pulse width (µs).
pub const SERVO_CENTER_US: u16 = 1500;
/// Full-right pulse width (µs).
pub const SERVO_MAX_US: u16 = 2000;

// ---------------------------------------------------------------------------
// Control loop
// ---------------------------------------------------------------------------

/// How long the servo holds a detected position (ms).
pub const HOLD_DURATION_MS: u32 = 5000;
/// Control cycle period (ms).
pub const CYCLE_PERIOD_MS: u32 = 50;
/// Settle time after power-on before the first control cycle (ms).
pub const STARTUP_DELAY_MS: u32 = 200;
/// Behaviour when motion is seen again during a hold.
pub const HOLD_POLICY: HoldPolicy = HoldPolicy::Fixed;
/// Logic level the PIR modules drive when they see motion.
pub const SENSOR_POLARITY: Polarity = Polarity::ActiveHigh;

/// Re-trigger behaviour while the controller is holding a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPolicy {
    /// The hold runs for its full duration; detections are ignored until it
    /// expires.
    Fixed,
    /// A detection during the hold restarts the hold timer and retargets the
    /// servo to the arbitrated sensor.
    Rearm,
}

/// Parameters consumed by the motion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Servo pulse range and neutral point.
    pub servo: PulseRange,
    /// Minimum time spent in ACTIVE after a detection (ms).
    pub hold_duration_ms: u32,
    /// Time between control cycles (ms).
    pub cycle_period_ms: u32,
    /// Re-trigger behaviour during a hold.
    pub hold_policy: HoldPolicy,
}

impl ControllerConfig {
    /// The configuration built from the compile-time constants.
    pub const fn standard() -> Self {
        Self {
            servo: PulseRange::new(SERVO_MIN_US, SERVO_CENTER_US, SERVO_MAX_US),
            hold_duration_ms: HOLD_DURATION_MS,
            cycle_period_ms: CYCLE_PERIOD_MS,
            hold_policy: HOLD_POLICY,
        }
    }

    /// Number of cycles an uninterrupted hold lasts.
    pub const fn hold_cycles(&self) -> u32 {
        if self.cycle_period_ms == 0 {
            return 0;
        }
        self.hold_duration_ms.div_ceil(self.cycle_period_ms)
    }

    /// `true` if the values describe a usable controller.
    pub const fn is_valid(&self) -> bool {
        self.servo.is_ordered()
            && self.cycle_period_ms > 0
            && self.hold_duration_ms >= self.cycle_period_ms
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Build-time checks: a bad constant must fail the build, not the device.
// ---------------------------------------------------------------------------

const _: () = assert!(
    REFERENCE_TIMING.fits(COUNTER_BITS),
    "frame top does not fit the counter"
);
const _: () = assert!(
    match FrameTiming::select(CLOCK_HZ, FRAME_RATE_HZ, COUNTER_BITS, &PRESCALER_CHOICES) {
        Some(t) => t.prescaler() == PRESCALER,
        None => false,
    },
    "PRESCALER is not the smallest divider that fits the counter"
);
const _: () = assert!(ControllerConfig::standard().is_valid(), "invalid controller constants");
const _: () = assert!(
    REFERENCE_TIMING.us_to_counts(SERVO_MAX_US as u32) < REFERENCE_TIMING.period_counts(),
    "max pulse longer than a frame"
);
