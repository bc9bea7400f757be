//! Sensor schedule driven by an injected clock.
//!
//! Verifies the update boundary (strictly more than the interval), the
//! one-step-per-late-tick rule and behaviour across clock wrap.

use crate::mock_ports::{MockClock, RecordingSink};

use apmonitor::app::service::AppService;
use apmonitor::config::SystemConfig;
use apmonitor::sensor::{MAX_VALUE, MIN_VALUE};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn started_at(ms: u64) -> (AppService, MockClock, RecordingSink, StdRng) {
    let mut app = AppService::new(&SystemConfig::default());
    let clock = MockClock::at(ms);
    let mut sink = RecordingSink::new();
    app.start(ms, &mut sink);
    sink.clear();
    (app, clock, sink, StdRng::seed_from_u64(42))
}

#[test]
fn no_update_at_exactly_the_interval() {
    let (mut app, clock, mut sink, mut rng) = started_at(0);
    for t in [0, 1, 2_500, 4_999, 5_000] {
        clock.set(t);
        app.tick(&clock, &mut rng, &mut sink);
    }
    assert!(sink.sensor_updates().is_empty());
}

#[test]
fn update_one_millisecond_past_the_interval() {
    let (mut app, clock, mut sink, mut rng) = started_at(0);
    clock.set(5_001);
    app.tick(&clock, &mut rng, &mut sink);
    let updates = sink.sensor_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(app.state().sensor.value(), updates[0]);
}

#[test]
fn late_tick_fires_once_and_rearms_from_now() {
    let (mut app, clock, mut sink, mut rng) = started_at(0);

    clock.set(60_000);
    app.tick(&clock, &mut rng, &mut sink);
    app.tick(&clock, &mut rng, &mut sink);
    assert_eq!(sink.sensor_updates().len(), 1);

    clock.set(65_000);
    app.tick(&clock, &mut rng, &mut sink);
    assert_eq!(sink.sensor_updates().len(), 1);

    clock.set(65_001);
    app.tick(&clock, &mut rng, &mut sink);
    assert_eq!(sink.sensor_updates().len(), 2);
}

#[test]
fn schedule_survives_clock_wrap() {
    let start = u64::MAX - 1_000;
    let (mut app, clock, mut sink, mut rng) = started_at(start);
    clock.advance(5_001);
    app.tick(&clock, &mut rng, &mut sink);
    assert_eq!(sink.sensor_updates().len(), 1);
}

#[test]
fn long_run_stays_in_bounds() {
    let (mut app, clock, mut sink, mut rng) = started_at(0);
    for _ in 0..10_000 {
        clock.advance(5_001);
        app.tick(&clock, &mut rng, &mut sink);
    }
    let updates = sink.sensor_updates();
    assert_eq!(updates.len(), 10_000);
    assert!(updates.iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
}

#[test]
fn same_seed_gives_same_walk() {
    let run = || {
        let (mut app, clock, mut sink, mut rng) = started_at(0);
        for _ in 0..50 {
            clock.advance(6_000);
            app.tick(&clock, &mut rng, &mut sink);
        }
        sink.sensor_updates()
    };
    assert_eq!(run(), run());
}
