//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (clock, system info, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches ESP-IDF directly.

use core::net::Ipv4Addr;

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic clock. Injected so the sensor schedule can be tested with
/// hand-picked timestamps.
pub trait TimePort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// System port
// ───────────────────────────────────────────────────────────────

/// Live system figures shown on the status page only.
pub trait SystemPort {
    /// Currently free heap, in bytes.
    fn free_heap_bytes(&self) -> u32;

    /// Address of the access point interface. `0.0.0.0` when bring-up failed.
    fn ap_ip(&self) -> Ipv4Addr;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the sensor)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`Scheduler`](crate::scheduler::Scheduler)
/// invokes when a schedule fires.
pub trait SchedulerDelegate {
    /// * `label`: the label of the schedule that fired.
    fn on_schedule_fired(&mut self, label: &str);
}
