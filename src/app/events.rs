//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::color::HexColor;
use crate::http::request::Method;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial state).
    Started { color: HexColor, sensor: f32 },

    /// The simulated reading took a random-walk step.
    SensorUpdated(f32),

    /// A client stored a new color.
    ColorChanged { from: HexColor, to: HexColor },

    /// A client submitted a value that is not a hex color.
    ColorRejected,

    /// No route matched.
    RouteNotFound { method: Method, uri: String },
}
