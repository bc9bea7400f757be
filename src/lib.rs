//! APMonitor firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod scheduler;
pub mod sensor;

pub mod adapters;

pub use error::{Error, Result};
