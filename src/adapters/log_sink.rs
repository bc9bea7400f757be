//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr on host).

use log::{info, warn};

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
            AppEvent::Started { color, sensor } => {
                info!("START | color={} sensor={:.1}", color, sensor);
            }
            AppEvent::SensorUpdated(value) => {
                info!("SENSOR | value={:.1}", value);
            }
            AppEvent::ColorChanged { from, to } => {
                info!("COLOR | {} -> {}", from, to);
            }
            AppEvent::ColorRejected => {
                warn!("COLOR | rejected invalid value");
            }
            AppEvent::RouteNotFound { method, uri } => {
                info!("HTTP | {} {} -> 404", method, uri);
            }
        }
    }
}
