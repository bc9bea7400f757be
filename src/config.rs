//! System configuration parameters
//!
//! All tunable parameters for the APMonitor firmware. Values are compiled
//! in; nothing is persisted across restarts.

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_COLOR, is_valid_color_hex};
use crate::error::{AccessPointError, Error};
use crate::sensor::{MAX_VALUE, MIN_VALUE};

/// Credentials and radio settings for the soft access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPointConfig {
    pub ssid: String,
    /// Empty for an open network.
    pub password: String,
    /// 2.4 GHz channel (1-13)
    pub channel: u8,
    /// Maximum simultaneously associated stations
    pub max_connections: u16,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            ssid: "ESP32-Access-Point".into(),
            password: "12345678".into(),
            channel: 1,
            max_connections: 4,
        }
    }
}

impl AccessPointConfig {
    pub fn validate(&self) -> Result<(), AccessPointError> {
        let ssid = self.ssid.as_bytes();
        if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
            return Err(AccessPointError::InvalidSsid);
        }
        let pass_len = self.password.len();
        if pass_len != 0 && !(8..=64).contains(&pass_len) {
            return Err(AccessPointError::InvalidPassword);
        }
        if !(1..=13).contains(&self.channel) {
            return Err(AccessPointError::InvalidChannel);
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

/// Returns `true` if every byte is in `0x20..=0x7E` (space through tilde).
fn is_printable_ascii(s: &[u8]) -> bool {
    s.iter().all(|b| (0x20..=0x7E).contains(b))
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Network ---
    pub access_point: AccessPointConfig,
    /// TCP port of the HTTP server
    pub http_port: u16,
    /// Time budget for reading one request (milliseconds)
    pub http_read_timeout_ms: u32,

    // --- Sensor ---
    /// Random-walk step interval (milliseconds)
    pub sensor_update_interval_ms: u32,
    /// Reading before the first step
    pub sensor_initial_value: f32,

    // --- Page ---
    /// Color shown until a client changes it
    pub default_color: String,
    /// Client-side auto reload period of the status page (seconds)
    pub page_refresh_secs: u32,

    // --- Main loop ---
    /// Sleep between iterations that served no client (milliseconds)
    pub idle_poll_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            access_point: AccessPointConfig::default(),
            http_port: 80,
            http_read_timeout_ms: 2000,

            sensor_update_interval_ms: 5000,
            sensor_initial_value: 23.5,

            default_color: DEFAULT_COLOR.into(),
            page_refresh_secs: 10,

            idle_poll_ms: 10,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the firmware cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        self.access_point.validate()?;
        if !(1..=10).contains(&self.access_point.max_connections) {
            return Err(Error::Config("max_connections outside 1..=10"));
        }
        if self.http_read_timeout_ms == 0 {
            return Err(Error::Config("http_read_timeout_ms must be > 0"));
        }
        if self.sensor_update_interval_ms == 0 {
            return Err(Error::Config("sensor_update_interval_ms must be > 0"));
        }
        if !(MIN_VALUE..=MAX_VALUE).contains(&self.sensor_initial_value) {
            return Err(Error::Config("sensor_initial_value outside 0..=100"));
        }
        if !is_valid_color_hex(&self.default_color) {
            return Err(Error::Config("default_color is not #RGB or #RRGGBB"));
        }
        if self.page_refresh_secs == 0 {
            return Err(Error::Config("page_refresh_secs must be > 0"));
        }
        Ok(())
    }
}
