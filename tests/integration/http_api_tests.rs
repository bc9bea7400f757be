//! Integration tests for the request → router → handler → state pipeline.
//!
//! Requests are fed to [`AppService`] as raw bytes, exactly as the server
//! adapter would hand them over.

use crate::mock_ports::{MockClock, MockSystem, RecordingSink};

use apmonitor::app::events::AppEvent;
use apmonitor::app::service::AppService;
use apmonitor::config::SystemConfig;
use apmonitor::http::request::HttpRequest;
use apmonitor::http::response::{CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, HttpResponse};

struct Harness {
    app: AppService,
    clock: MockClock,
    system: MockSystem,
    sink: RecordingSink,
}

impl Harness {
    fn new() -> Self {
        let mut app = AppService::new(&SystemConfig::default());
        let clock = MockClock::default();
        let mut sink = RecordingSink::new();
        app.start(0, &mut sink);
        sink.clear();
        Self {
            app,
            clock,
            system: MockSystem::default(),
            sink,
        }
    }

    fn send(&mut self, raw: &str) -> HttpResponse {
        let req = HttpRequest::parse(raw.as_bytes()).unwrap();
        self.app
            .handle_request(&req, &self.clock, &self.system, &mut self.sink)
    }

    fn post_form(&mut self, body: &str) -> HttpResponse {
        self.send(&format!(
            "POST /api/color HTTP/1.1\r\nHost: 192.168.4.1\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             Content-Length: {}\r\n\r\n{body}",
            body.len()
        ))
    }

    fn get_color(&mut self) -> HttpResponse {
        self.send("GET /api/color HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n")
    }
}

// ── Color API ─────────────────────────────────────────────────

#[test]
fn post_valid_color_then_get_returns_it() {
    let mut h = Harness::new();

    let resp = h.post_form("value=%23fff");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.content_type(), CONTENT_TYPE_JSON);
    assert_eq!(resp.body(), r##"{"color":"#fff"}"##);

    let resp = h.get_color();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), r##"{"color":"#fff"}"##);
}

#[test]
fn post_invalid_color_is_rejected_and_state_kept() {
    let mut h = Harness::new();
    h.post_form("value=%23123456");

    let resp = h.post_form("value=notacolor");
    assert_eq!(resp.status(), 400);
    assert_eq!(
        resp.body(),
        r#"{"error":"invalid color. use #RRGGBB or #RGB"}"#
    );

    assert_eq!(h.get_color().body(), r##"{"color":"#123456"}"##);
    assert_eq!(h.sink.events.last(), Some(&AppEvent::ColorRejected));
}

#[test]
fn get_color_defaults_before_any_post() {
    let mut h = Harness::new();
    assert_eq!(h.get_color().body(), r##"{"color":"#007bff"}"##);
}

#[test]
fn raw_body_fallback_accepts_bare_color() {
    let mut h = Harness::new();
    let resp = h.send(
        "POST /api/color HTTP/1.1\r\nContent-Type: text/plain\r\nContent-Length: 8\r\n\r\n#00ff00\n",
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(h.get_color().body(), r##"{"color":"#00ff00"}"##);
}

#[test]
fn query_value_is_accepted_on_post() {
    let mut h = Harness::new();
    let resp = h.send("POST /api/color?value=%23AbC HTTP/1.1\r\n\r\n");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), r##"{"color":"#AbC"}"##);
}

#[test]
fn color_case_is_preserved() {
    let mut h = Harness::new();
    h.post_form("value=%23AaBbCc");
    assert_eq!(h.get_color().body(), r##"{"color":"#AaBbCc"}"##);
}

#[test]
fn color_change_event_carries_both_values() {
    let mut h = Harness::new();
    h.post_form("value=%23dc3545");
    match h.sink.events.as_slice() {
        [AppEvent::ColorChanged { from, to }] => {
            assert_eq!(from.as_str(), "#007bff");
            assert_eq!(to.as_str(), "#dc3545");
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

// ── Status page ───────────────────────────────────────────────

#[test]
fn index_contains_color_and_one_decimal_value() {
    let mut h = Harness::new();
    h.post_form("value=%23198754");
    h.clock.set(42_000);

    let resp = h.send("GET / HTTP/1.1\r\n\r\n");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.content_type(), CONTENT_TYPE_HTML);
    let body = resp.body();
    assert!(body.contains("#198754"));
    assert!(body.contains("<div class='value-number'>23.5</div>"));
    assert!(body.contains("ESP32 IP: 192.168.4.1"));
    assert!(body.contains("SSID: ESP32-Access-Point"));
    assert!(body.contains("Last update: 42s"));
    assert!(body.contains("Free heap: 180000 bytes"));
}

#[test]
fn index_ignores_query_string() {
    let mut h = Harness::new();
    let resp = h.send("GET /?x=1 HTTP/1.1\r\n\r\n");
    assert_eq!(resp.status(), 200);
}

#[test]
fn index_after_failed_ap_shows_unspecified_address() {
    let mut h = Harness::new();
    h.system.ip = std::net::Ipv4Addr::UNSPECIFIED;
    let resp = h.send("GET / HTTP/1.1\r\n\r\n");
    assert!(resp.body().contains("ESP32 IP: 0.0.0.0"));
}

// ── Not found ─────────────────────────────────────────────────

#[test]
fn unknown_path_returns_diagnostic_404() {
    let mut h = Harness::new();
    let resp = h.send("GET /nope HTTP/1.1\r\n\r\n");
    assert_eq!(resp.status(), 404);
    assert!(resp.body().contains("URI: /nope"));
    assert!(resp.body().contains("Method: GET"));
    assert!(resp.body().contains("Arguments: 0"));
}

#[test]
fn wrong_method_on_color_endpoint_is_404() {
    let mut h = Harness::new();
    let resp = h.send("PUT /api/color?value=%23fff HTTP/1.1\r\n\r\n");
    assert_eq!(resp.status(), 404);
    assert!(resp.body().contains("Method: PUT"));
    assert!(resp.body().contains(" value: #fff\n"));
    assert_eq!(h.get_color().body(), r##"{"color":"#007bff"}"##);
}
