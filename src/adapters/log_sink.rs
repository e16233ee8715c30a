//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger in production, which goes to
//! UART / USB-CDC).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Activated { sensor, pulse_us } => {
                info!("MOTION | sensor={} pulse={}us", sensor, pulse_us);
            }
            AppEvent::HoldRearmed { sensor } => {
                info!("MOTION | sensor={} hold re-armed", sensor);
            }
            AppEvent::Released { sensor, held_ms } => {
                info!("HOLD | sensor={} released after {}ms", sensor, held_ms);
            }
        }
    }
}
