//! MotionServo firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. ESP-IDF bring-up lives in `drivers::hw_init`, compiled only
//! with the `espidf` feature; everything else builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
