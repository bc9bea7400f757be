//! Interval scheduler driven by an injected clock.
//!
//! The main loop passes the current monotonic time into [`Scheduler::tick`]
//! on every iteration. When a schedule's interval has elapsed the scheduler
//! notifies a [`SchedulerDelegate`]; it knows nothing about sensors or HTTP.
//!
//! ```text
//!  TimePort::now_ms() ──▶ Scheduler::tick() ──▶ SchedulerDelegate
//!                                                 (AppService steps
//!                                                  the sensor)
//! ```
//!
//! Because time is a parameter, the interval boundary is tested with plain
//! integers instead of sleeping.

use crate::app::ports::SchedulerDelegate;
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A recurring schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label, passed back to the delegate when it fires.
    pub label: &'static str,
    /// Minimum time between fires. A fire happens once strictly more than
    /// this many milliseconds have passed since the previous one.
    pub interval_ms: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Holds at most one armed schedule.
#[derive(Debug, Default)]
pub struct Scheduler {
    armed: Option<ScheduleEntry>,
}

#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    last_fired_ms: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// Arm `schedule`, replacing any previous one. Its first interval
    /// starts at `now_ms`.
    pub fn add(&mut self, schedule: Schedule, now_ms: u64) {
        info!(
            "Scheduler: armed '{}' every {}ms",
            schedule.label, schedule.interval_ms
        );
        self.armed = Some(ScheduleEntry {
            schedule,
            last_fired_ms: now_ms,
        });
    }

    /// Tick the scheduler. Call once per main-loop iteration.
    ///
    /// A due schedule fires at most once per call, however late the call
    /// is; missed intervals are not replayed.
    pub fn tick(&mut self, now_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        let Some(entry) = &mut self.armed else {
            return;
        };

        let elapsed = now_ms.wrapping_sub(entry.last_fired_ms);
        if elapsed > entry.schedule.interval_ms {
            delegate.on_schedule_fired(entry.schedule.label);
            entry.last_fired_ms = now_ms;
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
