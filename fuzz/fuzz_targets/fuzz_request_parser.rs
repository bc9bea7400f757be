//! Fuzz target: `expected_len` + `HttpRequest::parse`
//!
//! Drives arbitrary byte sequences through the framing check and the
//! request parser, then routes whatever parses through a fresh
//! `AppService`. Nothing may panic, and the stored color must stay valid.
//!
//! cargo fuzz run fuzz_request_parser

#![no_main]

use std::net::Ipv4Addr;

use apmonitor::app::events::AppEvent;
use apmonitor::app::ports::{EventSink, SystemPort, TimePort};
use apmonitor::app::service::AppService;
use apmonitor::color::is_valid_color_hex;
use apmonitor::config::SystemConfig;
use apmonitor::http::request::{HttpRequest, MAX_REQUEST_BYTES, expected_len};
use libfuzzer_sys::fuzz_target;

struct Fixed;

impl TimePort for Fixed {
    fn now_ms(&self) -> u64 {
        1_000
    }
}

impl SystemPort for Fixed {
    fn free_heap_bytes(&self) -> u32 {
        100_000
    }
    fn ap_ip(&self) -> Ipv4Addr {
        Ipv4Addr::new(192, 168, 4, 1)
    }
}

impl EventSink for Fixed {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    if let Ok(Some(total)) = expected_len(data) {
        assert!(total <= MAX_REQUEST_BYTES, "framing accepted an oversized request");
    }

    let Ok(req) = HttpRequest::parse(data) else {
        return;
    };
    assert!(req.uri().starts_with('/'));

    let mut app = AppService::new(&SystemConfig::default());
    let mut sink = Fixed;
    let resp = app.handle_request(&req, &Fixed, &Fixed, &mut sink);
    assert!(matches!(resp.status(), 200 | 400 | 404));
    assert!(is_valid_color_hex(app.state().color().as_str()));
});
