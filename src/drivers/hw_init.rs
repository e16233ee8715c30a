//! One-shot hardware peripheral initialization.
//!
//! Configures the three PIR inputs, the two indicator outputs, and the
//! LEDC timer/channel that carries the servo frame, then assembles them
//! into a [`HardwareAdapter`].  Called once from `main()` before the
//! control loop starts.

use anyhow::{Context, Result};
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, IOPin, Input, Output, OutputPin, PinDriver, Pull};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::config::{FRAME_RATE_HZ, REFERENCE_TIMING, SENSOR_POLARITY};
use crate::drivers::indicator::IndicatorPair;
use crate::drivers::servo_pwm::{FrameGenerator, PulseRange};
use crate::error::Error;
use crate::pins;
use crate::sensors::pir::{PirBank, Polarity};

pub type PirPin = PinDriver<'static, AnyIOPin, Input>;
pub type LedPin = PinDriver<'static, AnyOutputPin, Output>;

/// The adapter as built from ESP-IDF drivers.
pub type EspHardware = HardwareAdapter<PirPin, LedPin, LedcDriver<'static>>;

/// Bring up every peripheral the controller uses.
///
/// The servo is driven to `range.neutral_us` and the ready LED is lit
/// before this returns.
pub fn init_peripherals(p: Peripherals, range: PulseRange) -> Result<EspHardware> {
    let gpio = p.pins;

    // ── PIR inputs ────────────────────────────────────────────
    let pull = match SENSOR_POLARITY {
        Polarity::ActiveHigh => Pull::Down,
        Polarity::ActiveLow => Pull::Up,
    };
    let left = pir_input(gpio.gpio5.downgrade(), pull, "pir left")?;
    let center = pir_input(gpio.gpio6.downgrade(), pull, "pir center")?;
    let right = pir_input(gpio.gpio7.downgrade(), pull, "pir right")?;
    info!(
        "hw_init: PIR inputs on GPIO {}/{}/{} ({:?}, {:?})",
        pins::PIR_LEFT_GPIO,
        pins::PIR_CENTER_GPIO,
        pins::PIR_RIGHT_GPIO,
        SENSOR_POLARITY,
        pull
    );
    let sensors = PirBank::new(left, center, right, SENSOR_POLARITY);

    // ── Indicator LEDs ────────────────────────────────────────
    let ready = led_output(gpio.gpio11.downgrade_output(), "ready led")?;
    let active = led_output(gpio.gpio12.downgrade_output(), "active led")?;
    info!(
        "hw_init: indicators on GPIO {} (ready) / {} (active)",
        pins::READY_LED_GPIO,
        pins::ACTIVE_LED_GPIO
    );
    let indicators = IndicatorPair::new(ready, active);

    // ── Servo LEDC ────────────────────────────────────────────
    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(FRAME_RATE_HZ))
            .resolution(Resolution::Bits14),
    )
    .context(Error::Init("ledc timer"))?;
    let channel =
        LedcDriver::new(p.ledc.channel0, timer, gpio.gpio4).context(Error::Init("ledc channel"))?;
    info!(
        "hw_init: servo on GPIO {}, {} Hz, {}-bit duty (max {})",
        pins::SERVO_PWM_GPIO,
        FRAME_RATE_HZ,
        pins::SERVO_PWM_RESOLUTION_BITS,
        channel.get_max_duty()
    );
    let servo = FrameGenerator::configure(channel, REFERENCE_TIMING, range);

    info!("hw_init: all peripherals configured");
    Ok(HardwareAdapter::new(sensors, indicators, servo))
}

fn pir_input(
    pin: impl Peripheral<P = AnyIOPin> + 'static,
    pull: Pull,
    what: &'static str,
) -> Result<PirPin> {
    let mut driver = PinDriver::input(pin).context(Error::Init(what))?;
    driver.set_pull(pull).context(Error::Init(what))?;
    Ok(driver)
}

fn led_output(pin: impl Peripheral<P = AnyOutputPin> + 'static, what: &'static str) -> Result<LedPin> {
    let mut driver = PinDriver::output(pin).context(Error::Init(what))?;
    driver.set_low().context(Error::Init(what))?;
    Ok(driver)
}
