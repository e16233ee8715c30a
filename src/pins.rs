//! GPIO / peripheral pin assignments for the MotionServo board (ESP32-S3).
//!
//! Single source of truth for pin numbers.  `drivers::hw_init` picks the
//! matching typed pins from `Peripherals` and logs these numbers at boot;
//! change a pin here and there together.

// ---------------------------------------------------------------------------
// PIR motion sensors (HC-SR501 digital out)
// ---------------------------------------------------------------------------

pub const PIR_LEFT_GPIO: i32 = 5;
pub const PIR_CENTER_GPIO: i32 = 6;
pub const PIR_RIGHT_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Servo (LEDC timer 0, channel 0)
// ---------------------------------------------------------------------------

/// Servo signal line.
pub const SERVO_PWM_GPIO: i32 = 4;
/// LEDC resolution for the servo channel.  14 bits is the widest the
/// ESP32-S3 LEDC allows at 50 Hz from the 80 MHz APB clock.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Green: ready, servo neutral.
pub const READY_LED_GPIO: i32 = 11;
/// Red: active, holding a detected position.
pub const ACTIVE_LED_GPIO: i32 = 12;
