//! Mutable application state.
//!
//! The only state that outlives a request: the current color and the
//! simulated reading. Handlers receive it by reference; there is exactly
//! one writer, the main loop.

use crate::color::HexColor;
use crate::error::ColorError;
use crate::config::SystemConfig;
use crate::sensor::SimulatedSensor;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    color: HexColor,
    pub sensor: SimulatedSensor,
}

impl AppState {
    pub fn new(color: HexColor, sensor: SimulatedSensor) -> Self {
        Self { color, sensor }
    }

    /// Build from config, falling back to the default color when the
    /// configured one does not parse.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            color: HexColor::parse(&config.default_color).unwrap_or_default(),
            sensor: SimulatedSensor::new(config.sensor_initial_value),
        }
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    /// Validate and store `value`. On error the previous color is kept.
    /// Returns the replaced color.
    pub fn set_color(&mut self, value: &str) -> Result<HexColor, ColorError> {
        let next = HexColor::parse(value)?;
        Ok(core::mem::replace(&mut self.color, next))
    }
}
