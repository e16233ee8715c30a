//! Sensor subsystem: PIR identities, the per-cycle detection snapshot and the
//! [`pir`] input driver.
//!
//! Three PIR modules watch the left, centre and right of the field of view.
//! Each control cycle samples all three into a [`DetectionSnapshot`];
//! [`DetectionSnapshot::highest_priority`] arbitrates when more than one
//! fires in the same cycle.

pub mod pir;

use core::fmt;

/// Identity of one PIR sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorId {
    Left = 0,
    Center = 1,
    Right = 2,
}

impl SensorId {
    /// Number of sensors.
    pub const COUNT: usize = 3;

    /// Arbitration order, highest priority first.
    pub const PRIORITY: [SensorId; Self::COUNT] = [Self::Left, Self::Center, Self::Right];

    /// Position in [`Self::PRIORITY`] (and in per-sensor arrays).
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Readings of all three sensors taken in one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionSnapshot {
    pub left: bool,
    pub center: bool,
    pub right: bool,
}

impl DetectionSnapshot {
    /// Sample every sensor once, in priority order.
    pub fn sample(mut read: impl FnMut(SensorId) -> bool) -> Self {
        Self {
            left: read(SensorId::Left),
            center: read(SensorId::Center),
            right: read(SensorId::Right),
        }
    }

    pub const fn get(&self, sensor: SensorId) -> bool {
        match sensor {
            SensorId::Left => self.left,
            SensorId::Center => self.center,
            SensorId::Right => self.right,
        }
    }

    /// The sensor that wins arbitration: LEFT > CENTER > RIGHT.
    pub fn highest_priority(&self) -> Option<SensorId> {
        SensorId::PRIORITY.into_iter().find(|&s| self.get(s))
    }

    pub fn any(&self) -> bool {
        self.left || self.center || self.right
    }

    /// Number of sensors reporting motion.
    pub fn count(&self) -> usize {
        SensorId::PRIORITY.iter().filter(|&&s| self.get(s)).count()
    }
}
