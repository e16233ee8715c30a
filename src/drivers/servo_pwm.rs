//! Servo PWM frame generator.
//!
//! A free-running timer produces one pulse per frame (50 Hz → 20 ms).  The
//! output is asserted from the start of the frame until the compare match,
//! so the compare value *is* the pulse width in timer counts.
//!
//! ```text
//!   ┌──────┐                        ┌──────┐
//!   │pulse │        (low)           │pulse │
//! ──┘      └────────────────────────┘      └───
//!   0    compare                   TOP+1
//!   ◀──────────── one frame (20 ms) ──────────▶
//! ```
//!
//! Counts are expressed in a *reference timebase* ([`FrameTiming`]).  The
//! generator writes them with
//! [`SetDutyCycle::set_duty_cycle_fraction`] over the frame length, so a
//! channel whose `max_duty_cycle()` equals the frame length (AVR Timer1 in
//! ICR1-top mode) receives the counts verbatim and any other channel
//! (ESP32 LEDC) receives the same duty fraction.
//!
//! ## Glitch-free updates
//!
//! Compare writes land in the channel's shadow register and are latched at
//! the next frame boundary, so an in-flight pulse is never shortened or
//! stretched.  Writes happen every control cycle even when the value is
//! unchanged; a corrupted compare register is repaired within one cycle.

use embedded_hal::pwm::SetDutyCycle;
use log::{debug, info, warn};

use crate::error::Error;
use crate::sensors::SensorId;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const MICROS_PER_SEC: u64 = 1_000_000;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

/// Frame period expressed as a timer configuration.
///
/// `TOP = clock / (prescaler × frame_rate) − 1`; the counter runs `0..=TOP`
/// once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    clock_hz: u32,
    prescaler: u32,
    frame_hz: u32,
    top: u32,
}

impl FrameTiming {
    /// Derive the frame top for a fixed prescaler.
    pub const fn new(clock_hz: u32, prescaler: u32, frame_hz: u32) -> Self {
        let per_frame = clock_hz as u64 / (prescaler as u64 * frame_hz as u64);
        let top = if per_frame == 0 { 0 } else { per_frame - 1 };
        Self {
            clock_hz,
            prescaler,
            frame_hz,
            top: if top > u32::MAX as u64 { u32::MAX } else { top as u32 },
        }
    }

    /// Pick the smallest prescaler from `choices` whose frame top fits a
    /// `counter_bits`-wide counter.  `None` if no choice fits.
    pub const fn select(
        clock_hz: u32,
        frame_hz: u32,
        counter_bits: u32,
        choices: &[u32],
    ) -> Option<Self> {
        let mut i = 0;
        while i < choices.len() {
            let timing = Self::new(clock_hz, choices[i], frame_hz);
            if timing.fits(counter_bits) {
                return Some(timing);
            }
            i += 1;
        }
        None
    }

    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    pub const fn frame_hz(&self) -> u32 {
        self.frame_hz
    }

    /// Highest counter value in a frame.
    pub const fn top(&self) -> u32 {
        self.top
    }

    /// Counts per frame (`TOP + 1`).
    pub const fn period_counts(&self) -> u32 {
        self.top.saturating_add(1)
    }

    /// `true` if `TOP` is representable in a `counter_bits`-wide counter.
    pub const fn fits(&self, counter_bits: u32) -> bool {
        counter_bits >= 32 || self.top < (1u32 << counter_bits)
    }

    /// Convert a pulse width to timer counts (rounded down).
    pub const fn us_to_counts(&self, us: u32) -> u32 {
        let counts =
            us as u64 * self.clock_hz as u64 / (self.prescaler as u64 * MICROS_PER_SEC);
        if counts > u32::MAX as u64 { u32::MAX } else { counts as u32 }
    }

    /// Duration of one timer count (ns, rounded down).
    pub const fn tick_ns(&self) -> u64 {
        self.prescaler as u64 * NANOS_PER_SEC / self.clock_hz as u64
    }

    /// Actual frame period produced by this configuration (ns, rounded down).
    pub const fn frame_period_ns(&self) -> u64 {
        self.period_counts() as u64 * self.prescaler as u64 * NANOS_PER_SEC
            / self.clock_hz as u64
    }
}

// ---------------------------------------------------------------------------
// Pulse range
// ---------------------------------------------------------------------------

/// Allowed servo pulse widths and the neutral point (µs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRange {
    pub min_us: u16,
    pub neutral_us: u16,
    pub max_us: u16,
}

impl PulseRange {
    pub const fn new(min_us: u16, neutral_us: u16, max_us: u16) -> Self {
        Self {
            min_us,
            neutral_us,
            max_us,
        }
    }

    /// `min ≤ neutral ≤ max`.
    pub const fn is_ordered(&self) -> bool {
        self.min_us <= self.neutral_us && self.neutral_us <= self.max_us
    }

    /// Clamp a requested pulse width into the range.  Never panics: an
    /// inverted range resolves to `max_us`.
    pub fn clamp(&self, us: u16) -> u16 {
        us.max(self.min_us).min(self.max_us)
    }

    /// Pulse width a sensor points the servo at.
    pub const fn target_for(&self, sensor: SensorId) -> u16 {
        match sensor {
            SensorId::Left => self.min_us,
            SensorId::Center => self.neutral_us,
            SensorId::Right => self.max_us,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame generator
// ---------------------------------------------------------------------------

/// Owns the servo PWM channel and translates pulse widths into compare
/// writes.
pub struct FrameGenerator<P> {
    pwm: P,
    timing: FrameTiming,
    range: PulseRange,
    pulse_us: u16,
    compare: u32,
}

impl<P: SetDutyCycle> FrameGenerator<P> {
    /// Take ownership of a channel whose timer already runs at
    /// `timing.frame_hz()` and drive it to the neutral pulse.
    pub fn configure(pwm: P, timing: FrameTiming, range: PulseRange) -> Self {
        let mut generator = Self {
            pwm,
            timing,
            range,
            pulse_us: range.neutral_us,
            compare: timing.us_to_counts(range.neutral_us as u32),
        };
        info!(
            "servo_pwm: {} Hz frames, top={} (÷{}), pulse {}..{} counts, channel max duty {}",
            timing.frame_hz(),
            timing.top(),
            timing.prescaler(),
            generator.min_counts(),
            generator.max_counts(),
            generator.pwm.max_duty_cycle()
        );
        generator.set_pulse_width(range.neutral_us);
        generator
    }

    /// Clamped compare value for a pulse width.
    pub fn counts_for(&self, us: u16) -> u32 {
        self.timing.us_to_counts(self.range.clamp(us) as u32)
    }

    /// Command a new pulse width.  Out-of-range requests are clamped to the
    /// configured servo range.  Takes effect at the next frame boundary.
    pub fn set_pulse_width(&mut self, us: u16) {
        let clamped = self.range.clamp(us);
        if clamped != us {
            debug!("servo_pwm: {}us clamped to {}us", us, clamped);
        }
        let counts = self.counts_for(clamped);
        let (num, denom) = duty_fraction(counts, self.timing.period_counts());

        match self.pwm.set_duty_cycle_fraction(num, denom) {
            Ok(()) => {
                if counts != self.compare {
                    debug!("servo_pwm: compare {} -> {}", self.compare, counts);
                }
                self.pulse_us = clamped;
                self.compare = counts;
            }
            Err(e) => warn!("{}: {:?}", Error::Pwm, e),
        }
    }

    /// Last pulse width successfully written (µs, after clamping).
    pub fn pulse_us(&self) -> u16 {
        self.pulse_us
    }

    /// Last compare value successfully written (reference counts).
    pub fn compare(&self) -> u32 {
        self.compare
    }

    pub fn min_counts(&self) -> u32 {
        self.timing.us_to_counts(self.range.min_us as u32)
    }

    pub fn max_counts(&self) -> u32 {
        self.timing.us_to_counts(self.range.max_us as u32)
    }

}

/// Reduce `counts / period` to a `u16` fraction without changing its value
/// by more than one part in 2^16.
fn duty_fraction(counts: u32, period: u32) -> (u16, u16) {
    let shift = (32 - period.leading_zeros()).saturating_sub(16);
    let denom = (period >> shift).max(1);
    let num = (counts >> shift).min(denom);
    (num as u16, denom as u16)
}
