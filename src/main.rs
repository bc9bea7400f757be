//! APMonitor Firmware: Main Entry Point
//!
//! Soft access point plus a single-threaded HTTP poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  WifiAdapter        HttpServer     LogEventSink   Esp32Time    │
//! │  (AccessPoint)      (TCP poll)     (EventSink)    (TimePort)   │
//! │  EspSystemAdapter                                              │
//! │  (SystemPort)                                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  AppState · Router · Handlers · Page renderer          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven sensor random walk)                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use apmonitor::adapters::http_server::HttpServer;
use apmonitor::adapters::log_sink::LogEventSink;
use apmonitor::adapters::system::EspSystemAdapter;
use apmonitor::adapters::time::Esp32TimeAdapter;
use apmonitor::adapters::wifi::{WifiAdapter, start_or_degrade};
use apmonitor::app::ports::TimePort;
use apmonitor::app::service::AppService;
use apmonitor::config::SystemConfig;

// ── Main ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    banner();

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Access point ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = match EspDefaultNvsPartition::take() {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("NVS partition unavailable ({}), WiFi runs without it", e);
            None
        }
    };

    // The driver must outlive the loop or the AP goes down with it.
    let (ap_ip, _wifi) = match WifiAdapter::new(peripherals.modem, sysloop, nvs) {
        Ok(mut wifi) => (start_or_degrade(&mut wifi, &config.access_point), Some(wifi)),
        Err(e) => {
            log::error!("AP bring-up failed: {} (continuing without network)", e);
            (core::net::Ipv4Addr::UNSPECIFIED, None)
        }
    };

    run(&config, ap_ip)
}

/// Host simulation: same loop, simulated AP, unprivileged port.
#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    banner();

    let config = SystemConfig {
        http_port: 8080,
        ..SystemConfig::default()
    };
    config.validate()?;

    let mut wifi = WifiAdapter::new();
    let ap_ip = start_or_degrade(&mut wifi, &config.access_point);

    run(&config, ap_ip)
}

fn banner() {
    info!("╔══════════════════════════════════════╗");
    info!("║  APMonitor v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
}

// ── Event loop ────────────────────────────────────────────────

fn run(config: &SystemConfig, ap_ip: core::net::Ipv4Addr) -> Result<()> {
    let clock = Esp32TimeAdapter::new();
    let system = EspSystemAdapter::new(ap_ip);
    let mut log_sink = LogEventSink::new();
    let mut rng = StdRng::from_entropy();

    let mut server = HttpServer::bind(config.http_port, config.http_read_timeout_ms)?;

    let mut app = AppService::new(config);
    app.start(clock.now_ms(), &mut log_sink);

    info!("Server ready on http://{}:{}/", ap_ip, config.http_port);

    let idle = Duration::from_millis(u64::from(config.idle_poll_ms));

    loop {
        let served = match server.poll(|req| app.handle_request(req, &clock, &system, &mut log_sink)) {
            Ok(served) => served,
            Err(e) => {
                warn!("HTTP: {}", e);
                false
            }
        };

        app.tick(&clock, &mut rng, &mut log_sink);

        if !served {
            std::thread::sleep(idle);
        }
    }
}
