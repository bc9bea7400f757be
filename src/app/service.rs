//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the shared state and the sensor schedule. It is
//! hardware-agnostic: the clock, system figures, randomness and event
//! output are all injected at call sites, so the whole request/tick cycle
//! runs under `cargo test` with mock adapters.
//!
//! ```text
//!   TimePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                │        AppService         │
//! SystemPort ──▶ │  State · Scheduler · HTTP │
//!                └──────────────────────────┘
//! ```

use log::info;
use rand::Rng;

use crate::config::SystemConfig;
use crate::http::handlers::{self, PageInfo};
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::router::Route;
use crate::scheduler::{Schedule, Scheduler};
use crate::sensor::SimulatedSensor;

use super::events::AppEvent;
use super::ports::{EventSink, SchedulerDelegate, SystemPort, TimePort};
use super::state::AppState;

/// Label of the random-walk schedule.
pub const SENSOR_SCHEDULE: &str = "sensor-update";

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    state: AppState,
    scheduler: Scheduler,
    ssid: String,
    refresh_secs: u32,
    interval_ms: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// The sensor schedule is not armed until [`start`](Self::start).
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: AppState::from_config(config),
            scheduler: Scheduler::new(),
            ssid: config.access_point.ssid.clone(),
            refresh_secs: config.page_refresh_secs,
            interval_ms: u64::from(config.sensor_update_interval_ms),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Arm the sensor schedule; the first step is due one interval after
    /// `now_ms`.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.scheduler.add(
            Schedule {
                label: SENSOR_SCHEDULE,
                interval_ms: self.interval_ms,
            },
            now_ms,
        );
        sink.emit(&AppEvent::Started {
            color: self.state.color().clone(),
            sensor: self.state.sensor.value(),
        });
        info!(
            "AppService started: color={} sensor={}",
            self.state.color(),
            self.state.sensor.formatted()
        );
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // ── Per-iteration work ────────────────────────────────────

    /// Advance the sensor if its interval has elapsed.
    pub fn tick(&mut self, clock: &impl TimePort, rng: &mut impl Rng, sink: &mut impl EventSink) {
        let mut step = SensorStep {
            sensor: &mut self.state.sensor,
            rng,
            sink,
        };
        self.scheduler.tick(clock.now_ms(), &mut step);
    }

    /// Route and answer one parsed request.
    pub fn handle_request(
        &mut self,
        req: &HttpRequest,
        clock: &impl TimePort,
        system: &impl SystemPort,
        sink: &mut impl EventSink,
    ) -> HttpResponse {
        match Route::resolve(req.method(), req.uri()) {
            Route::Index => handlers::index(
                &self.state,
                &PageInfo {
                    ap_ip: system.ap_ip(),
                    ssid: &self.ssid,
                    uptime_secs: clock.now_ms() / 1000,
                    free_heap_bytes: system.free_heap_bytes(),
                    refresh_secs: self.refresh_secs,
                },
            ),
            Route::GetColor => handlers::get_color(&self.state),
            Route::SetColor => handlers::set_color(&mut self.state, req, sink),
            Route::NotFound => handlers::not_found(req, sink),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Borrows only the pieces a sensor step needs, so the scheduler can be
/// ticked while it is held.
struct SensorStep<'a, R, S> {
    sensor: &'a mut SimulatedSensor,
    rng: &'a mut R,
    sink: &'a mut S,
}

impl<R: Rng, S: EventSink> SchedulerDelegate for SensorStep<'_, R, S> {
    fn on_schedule_fired(&mut self, label: &str) {
        if label == SENSOR_SCHEDULE {
            let value = self.sensor.step(&mut *self.rng);
            self.sink.emit(&AppEvent::SensorUpdated(value));
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
