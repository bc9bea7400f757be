//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements      | Connects to                |
//! |---------------|-----------------|----------------------------|
//! | `http_server` | -               | lwIP / std TCP listener    |
//! | `log_sink`    | EventSink       | Serial log output          |
//! | `system`      | SystemPort      | ESP-IDF heap statistics    |
//! | `time`        | TimePort        | ESP32 system timer         |
//! | `wifi`        | AccessPointPort | ESP-IDF WiFi soft AP       |

pub mod http_server;
pub mod log_sink;
pub mod system;
pub mod time;
pub mod wifi;
