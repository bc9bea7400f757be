//! Mock port adapters for integration tests.
//!
//! A hand-driven clock, fixed system figures and an event recorder, so
//! tests can assert on the full event history without ESP-IDF.

use std::cell::Cell;
use std::net::Ipv4Addr;

use apmonitor::app::events::AppEvent;
use apmonitor::app::ports::{EventSink, SystemPort, TimePort};

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(ms: u64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl TimePort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── MockSystem ────────────────────────────────────────────────

pub struct MockSystem {
    pub free_heap: u32,
    pub ip: Ipv4Addr,
}

impl Default for MockSystem {
    fn default() -> Self {
        Self {
            free_heap: 180_000,
            ip: Ipv4Addr::new(192, 168, 4, 1),
        }
    }
}

impl SystemPort for MockSystem {
    fn free_heap_bytes(&self) -> u32 {
        self.free_heap
    }

    fn ap_ip(&self) -> Ipv4Addr {
        self.ip
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor_updates(&self) -> Vec<f32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::SensorUpdated(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
