//! Application core: pure domain logic, zero I/O.
//!
//! Holds the color and sensor state, routes HTTP requests to handlers and
//! drives the sensor schedule. All interaction with the radio, clock and
//! heap happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable on the host.

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
