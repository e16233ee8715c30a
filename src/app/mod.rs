//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the motion arbitration rules: FSM orchestration,
//! per-sensor activation bookkeeping and the cycle cadence.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
