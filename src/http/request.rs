//! HTTP/1.x request parsing.
//!
//! One request per connection. The server feeds the raw bytes read so far
//! to [`expected_len`] until the request is complete, then hands the buffer
//! to [`HttpRequest::parse`]. The request line and headers are tokenised by
//! `httparse`; framing is `Content-Length` only.
//!
//! Arguments follow the conventions of small embedded web servers:
//! query-string pairs for every method, plus the pairs of a
//! `application/x-www-form-urlencoded` body. The raw body is always kept
//! so handlers can fall back to it.

use core::fmt;

use super::form::parse_pairs;
use crate::error::HttpError;

/// Upper bound on a whole request (head + body).
pub const MAX_REQUEST_BYTES: usize = 4096;

/// Header slots handed to the tokenizer; more headers is a bad request.
pub const MAX_HEADERS: usize = 32;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ───────────────────────────────────────────────────────────────
// Method
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Other(String),
}

impl Method {
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH" => Self::Patch,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───────────────────────────────────────────────────────────────
// Head tokenising and framing
// ───────────────────────────────────────────────────────────────

/// Request line and headers, owned, plus the byte length of the head.
struct Head {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    len: usize,
}

impl Head {
    /// `Ok(None)` while the blank line ending the head has not arrived.
    fn parse(buf: &[u8]) -> Result<Option<Self>, HttpError> {
        let mut slots = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut req = httparse::Request::new(&mut slots);
        let len = match req.parse(buf) {
            Ok(httparse::Status::Complete(len)) => len,
            Ok(httparse::Status::Partial) => return Ok(None),
            Err(_) => return Err(HttpError::Malformed),
        };

        let (Some(method), Some(target)) = (req.method, req.path) else {
            return Err(HttpError::Malformed);
        };
        if !target.starts_with('/') {
            return Err(HttpError::Malformed);
        }

        let headers = req
            .headers
            .iter()
            .map(|h| {
                let value = core::str::from_utf8(h.value).map_err(|_| HttpError::Malformed)?;
                Ok((h.name.to_string(), value.trim().to_string()))
            })
            .collect::<Result<Vec<_>, HttpError>>()?;

        Ok(Some(Self {
            method: method.to_string(),
            target: target.to_string(),
            headers,
            len,
        }))
    }

    /// Head plus declared body, bounded by [`MAX_REQUEST_BYTES`].
    fn total_len(&self) -> Result<usize, HttpError> {
        let body_len = match self
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        {
            Some((_, v)) => {
                let n: u64 = v.parse().map_err(|_| HttpError::Malformed)?;
                usize::try_from(n).map_err(|_| HttpError::PayloadTooLarge)?
            }
            None => 0,
        };
        self.len
            .checked_add(body_len)
            .filter(|total| *total <= MAX_REQUEST_BYTES)
            .ok_or(HttpError::PayloadTooLarge)
    }
}

/// Total request length once the head is complete, `None` while it is
/// still arriving.
pub fn expected_len(buf: &[u8]) -> Result<Option<usize>, HttpError> {
    match Head::parse(buf)? {
        Some(head) => head.total_len().map(Some),
        None if buf.len() >= MAX_REQUEST_BYTES => Err(HttpError::PayloadTooLarge),
        None => Ok(None),
    }
}

// ───────────────────────────────────────────────────────────────
// HttpRequest
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    args: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Parse one complete request.
    pub fn parse(raw: &[u8]) -> Result<Self, HttpError> {
        let head = Head::parse(raw)?.ok_or(HttpError::Malformed)?;
        let total = head.total_len()?;
        let body = raw.get(head.len..total).ok_or(HttpError::Malformed)?.to_vec();

        let (path, query) = match head.target.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (head.target.as_str(), None),
        };
        let mut args = query.map(parse_pairs).unwrap_or_default();

        let mut req = Self {
            method: Method::parse(&head.method),
            path: path.to_string(),
            headers: head.headers,
            args: Vec::new(),
            body,
        };
        if req.is_form() {
            if let Ok(text) = core::str::from_utf8(&req.body) {
                args.extend(parse_pairs(text));
            }
        }
        req.args = args;
        Ok(req)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    pub fn uri(&self) -> &str {
        &self.path
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All query and form arguments, in arrival order.
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    /// First argument named `name`.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, when non-empty and valid UTF-8.
    pub fn plain_body(&self) -> Option<&str> {
        if self.body.is_empty() {
            return None;
        }
        core::str::from_utf8(&self.body).ok()
    }

    fn is_form(&self) -> bool {
        self.header("content-type").is_some_and(|ct| {
            ct.get(..FORM_CONTENT_TYPE.len())
                .is_some_and(|p| p.eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        })
    }
}
