//! MotionServo Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  HardwareAdapter                     LogEventSink          │
//! │  (PIR bank · servo PWM · LEDs)       (EventSink)           │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │          MotionController (pure logic)               │  │
//! │  │  FSM · arbitration · hold timer                      │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use log::info;

use motionservo::adapters::log_sink::LogEventSink;
use motionservo::app::service::MotionController;
use motionservo::config::{ControllerConfig, STARTUP_DELAY_MS};
use motionservo::drivers::hw_init;
use motionservo::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  MotionServo v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    let config = ControllerConfig::standard();
    let peripherals = Peripherals::take().context(Error::Init("peripherals"))?;
    let mut hw = hw_init::init_peripherals(peripherals, config.servo)?;

    // PIR modules need a moment after power-on before their output means
    // anything.
    FreeRtos::delay_ms(STARTUP_DELAY_MS);

    // ── 3. Controller ─────────────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut controller = MotionController::new(config);
    controller.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    let mut delay = FreeRtos;
    loop {
        controller.tick(&mut hw, &mut log_sink);
        controller.sleep_until_next_cycle(&mut delay);
    }
}
