//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                     |
//! |----------------|--------------------|---------------------------------|
//! | `hardware`     | SensorPort         | PIR inputs (embedded-hal GPIO)  |
//! |                | ActuatorPort       | Servo PWM, indicator LEDs       |
//! | `log_sink`     | EventSink          | Serial log output               |

pub mod hardware;
pub mod log_sink;
