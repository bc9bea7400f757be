//! Route handlers.
//!
//! Each handler takes the application state by reference and returns a
//! complete [`HttpResponse`]; none of them touch the network.

use core::fmt::Write;

use serde::Serialize;

use super::request::HttpRequest;
use super::response::HttpResponse;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::state::AppState;
use crate::render::{PageContext, render_page};

/// Error message returned for any rejected color submission.
pub const INVALID_COLOR_MESSAGE: &str = "invalid color. use #RRGGBB or #RGB";

#[derive(Serialize)]
struct ColorBody<'a> {
    color: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Page values that come from outside [`AppState`].
#[derive(Debug, Clone, Copy)]
pub struct PageInfo<'a> {
    pub ap_ip: core::net::Ipv4Addr,
    pub ssid: &'a str,
    pub uptime_secs: u64,
    pub free_heap_bytes: u32,
    pub refresh_secs: u32,
}

/// `/`: the status page.
pub fn index(state: &AppState, info: &PageInfo<'_>) -> HttpResponse {
    HttpResponse::html(render_page(&PageContext {
        color: state.color().as_str(),
        sensor_value: state.sensor.value(),
        ap_ip: info.ap_ip,
        ssid: info.ssid,
        uptime_secs: info.uptime_secs,
        free_heap_bytes: info.free_heap_bytes,
        refresh_secs: info.refresh_secs,
    }))
}

/// `GET /api/color`
pub fn get_color(state: &AppState) -> HttpResponse {
    HttpResponse::json(
        200,
        &ColorBody {
            color: state.color().as_str(),
        },
    )
}

/// `POST /api/color`
///
/// Reads the `value` argument; when it is missing or empty, falls back to
/// the trimmed raw body. Invalid input leaves the stored color untouched.
pub fn set_color(
    state: &mut AppState,
    req: &HttpRequest,
    sink: &mut impl EventSink,
) -> HttpResponse {
    let value = match req.arg("value") {
        Some(v) if !v.is_empty() => v,
        _ => req.plain_body().map(str::trim).unwrap_or_default(),
    };

    match state.set_color(value) {
        Ok(previous) => {
            sink.emit(&AppEvent::ColorChanged {
                from: previous,
                to: state.color().clone(),
            });
            get_color(state)
        }
        Err(_) => {
            sink.emit(&AppEvent::ColorRejected);
            HttpResponse::json(
                400,
                &ErrorBody {
                    error: INVALID_COLOR_MESSAGE,
                },
            )
        }
    }
}

/// Catch-all: echoes method, URI and arguments as plain text.
pub fn not_found(req: &HttpRequest, sink: &mut impl EventSink) -> HttpResponse {
    sink.emit(&AppEvent::RouteNotFound {
        method: req.method().clone(),
        uri: req.uri().to_string(),
    });

    let mut message = String::from("Page not found\n\n");
    let _ = write!(
        message,
        "URI: {}\nMethod: {}\nArguments: {}\n",
        req.uri(),
        req.method(),
        req.args().len()
    );
    for (name, value) in req.args() {
        let _ = writeln!(message, " {name}: {value}");
    }
    HttpResponse::text(404, message)
}
