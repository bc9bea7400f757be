//! Minimal HTTP/1.1 request/response layer.
//!
//! Pure parsing, routing and handlers. The socket side lives in
//! [`crate::adapters::http_server`].

pub mod form;
pub mod handlers;
pub mod request;
pub mod response;
pub mod router;

pub use request::{HttpRequest, Method};
pub use response::HttpResponse;
pub use router::Route;
