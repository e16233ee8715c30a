//! Servo and indicator drivers, plus ESP32 peripheral bring-up.

#[cfg(feature = "espidf")]
pub mod hw_init;
pub mod indicator;
pub mod servo_pwm;
