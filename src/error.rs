//! Unified error types for the APMonitor firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! main loop's error handling uniform. All variants are `Copy` so they can
//! be passed through the HTTP layer and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The Wi-Fi access point could not be brought up.
    AccessPoint(AccessPointError),
    /// A submitted color failed the hex-color grammar.
    InvalidColor(ColorError),
    /// The HTTP server or request parser failed.
    Http(HttpError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessPoint(e) => write!(f, "access point: {e}"),
            Self::InvalidColor(e) => write!(f, "color: {e}"),
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Access point errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPointError {
    /// SSID empty, longer than 32 bytes, or not printable ASCII.
    InvalidSsid,
    /// Password neither empty (open) nor 8-64 bytes (WPA2).
    InvalidPassword,
    /// Channel outside 1-13.
    InvalidChannel,
    /// The radio driver could not be created.
    DriverInit,
    /// The driver refused the configuration or failed to start.
    StartFailed,
}

impl fmt::Display for AccessPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::InvalidChannel => write!(f, "channel invalid (must be 1-13)"),
            Self::DriverInit => write!(f, "WiFi driver init failed"),
            Self::StartFailed => write!(f, "WiFi AP start failed"),
        }
    }
}

impl std::error::Error for AccessPointError {}

impl From<AccessPointError> for Error {
    fn from(e: AccessPointError) -> Self {
        Self::AccessPoint(e)
    }
}

// ---------------------------------------------------------------------------
// Color errors
// ---------------------------------------------------------------------------

/// Rejection reasons for a submitted hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    /// Not 4 or 7 bytes long.
    BadLength,
    /// Does not start with `#`.
    MissingHash,
    /// A character after `#` is not `[0-9a-fA-F]`.
    NotHex,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength => write!(f, "expected #RGB or #RRGGBB"),
            Self::MissingHash => write!(f, "missing leading '#'"),
            Self::NotHex => write!(f, "non-hex digit"),
        }
    }
}

impl std::error::Error for ColorError {}

impl From<ColorError> for Error {
    fn from(e: ColorError) -> Self {
        Self::InvalidColor(e)
    }
}

// ---------------------------------------------------------------------------
// HTTP errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    /// The listening socket could not be bound.
    Bind,
    /// Socket read or write failed.
    Io,
    /// The request line or headers could not be parsed.
    Malformed,
    /// The request exceeds the fixed request buffer.
    PayloadTooLarge,
    /// The client did not deliver a complete request in time.
    Timeout,
}

impl HttpError {
    /// Status code sent back to the client when this error ends a request.
    pub const fn status(self) -> u16 {
        match self {
            Self::Malformed => 400,
            Self::Timeout => 408,
            Self::PayloadTooLarge => 413,
            Self::Bind | Self::Io => 500,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind => write!(f, "bind failed"),
            Self::Io => write!(f, "socket I/O error"),
            Self::Malformed => write!(f, "malformed request"),
            Self::PayloadTooLarge => write!(f, "request too large"),
            Self::Timeout => write!(f, "request read timed out"),
        }
    }
}

impl std::error::Error for HttpError {}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
