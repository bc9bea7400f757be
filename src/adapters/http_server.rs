//! Single-client HTTP server adapter.
//!
//! A non-blocking `std::net::TcpListener` polled from the main loop. On
//! ESP-IDF the std socket API sits on lwIP, so the same code runs on
//! target and host.
//!
//! ## Lifecycle
//!
//! 1. [`bind`](HttpServer::bind) listens on `0.0.0.0:<port>`.
//! 2. [`poll`](HttpServer::poll) accepts at most one waiting client, reads
//!    one request within the read timeout, hands it to the handler and
//!    writes the response.
//! 3. The connection is closed after every response.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::HttpError;
use crate::http::request::{HttpRequest, expected_len};
use crate::http::response::HttpResponse;

const READ_CHUNK: usize = 512;

pub struct HttpServer {
    listener: TcpListener,
    read_timeout: Duration,
}

impl HttpServer {
    /// Bind to `0.0.0.0:<port>`. Port `0` lets the OS pick one (see
    /// [`local_addr`](Self::local_addr)).
    pub fn bind(port: u16, read_timeout_ms: u32) -> Result<Self, HttpError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).map_err(|e| {
            warn!("HTTP: bind {} failed: {}", addr, e);
            HttpError::Bind
        })?;
        listener.set_nonblocking(true).map_err(|_| HttpError::Bind)?;

        info!("HTTP: listening on {}", addr);

        Ok(Self {
            listener,
            read_timeout: Duration::from_millis(u64::from(read_timeout_ms)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, HttpError> {
        self.listener.local_addr().map_err(|_| HttpError::Io)
    }

    /// Serve at most one waiting client.
    ///
    /// Returns `Ok(false)` when nobody was waiting. Per-connection failures
    /// are answered (where possible) and logged; only listener errors are
    /// returned.
    pub fn poll(
        &mut self,
        mut handler: impl FnMut(&HttpRequest) -> HttpResponse,
    ) -> Result<bool, HttpError> {
        let (mut stream, peer) = match self.listener.accept() {
            Ok(conn) => conn,
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => return Ok(false),
            Err(e) => {
                warn!("HTTP: accept error: {}", e);
                return Err(HttpError::Io);
            }
        };

        let response = match self.read_request(&mut stream).and_then(|raw| HttpRequest::parse(&raw)) {
            Ok(req) => {
                debug!("HTTP: {} {} from {}", req.method(), req.uri(), peer);
                handler(&req)
            }
            Err(HttpError::Io) => {
                warn!("HTTP: read from {} failed", peer);
                return Ok(true);
            }
            Err(e) => {
                warn!("HTTP: {} from {}", e, peer);
                HttpResponse::text(e.status(), format!("{e}\n"))
            }
        };

        if let Err(e) = stream
            .write_all(&response.to_bytes())
            .and_then(|()| stream.flush())
        {
            warn!("HTTP: write to {} failed: {}", peer, e);
        }
        let _ = stream.shutdown(std::net::Shutdown::Both);
        Ok(true)
    }

    /// Read one complete request, bounded by the read timeout and
    /// [`MAX_REQUEST_BYTES`](crate::http::request::MAX_REQUEST_BYTES).
    fn read_request(&self, stream: &mut TcpStream) -> Result<Vec<u8>, HttpError> {
        // Accepted sockets may inherit the listener's non-blocking flag.
        stream.set_nonblocking(false).map_err(|_| HttpError::Io)?;

        let deadline = Instant::now() + self.read_timeout;
        let mut buf = Vec::with_capacity(READ_CHUNK);
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(HttpError::Timeout);
            }
            stream
                .set_read_timeout(Some(remaining))
                .map_err(|_| HttpError::Io)?;

            match stream.read(&mut chunk) {
                Ok(0) => return Err(HttpError::Malformed),
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(ref e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(HttpError::Timeout);
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return Err(HttpError::Io),
            }

            if let Some(total) = expected_len(&buf)? {
                if buf.len() >= total {
                    buf.truncate(total);
                    return Ok(buf);
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
