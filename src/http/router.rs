//! Route table.
//!
//! | Method | Path         | Route      |
//! |--------|--------------|------------|
//! | any    | `/`          | `Index`    |
//! | GET    | `/api/color` | `GetColor` |
//! | POST   | `/api/color` | `SetColor` |
//! | *      | *            | `NotFound` |

use super::request::Method;

pub const INDEX_PATH: &str = "/";
pub const COLOR_PATH: &str = "/api/color";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    GetColor,
    SetColor,
    NotFound,
}

impl Route {
    /// `path` must already have its query string stripped.
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method, path) {
            (_, INDEX_PATH) => Self::Index,
            (Method::Get, COLOR_PATH) => Self::GetColor,
            (Method::Post, COLOR_PATH) => Self::SetColor,
            _ => Self::NotFound,
        }
    }
}
