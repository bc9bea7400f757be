//! Hex color grammar and the validated [`HexColor`] value.
//!
//! Grammar: a leading `#` followed by exactly 3 or 6 characters from
//! `[0-9a-fA-F]`. The submitted case is preserved; no normalisation.

use core::fmt;

use crate::error::ColorError;

/// Longest accepted color string (`#RRGGBB`).
pub const MAX_COLOR_LEN: usize = 7;

/// Color shown until a client picks another one.
pub const DEFAULT_COLOR: &str = "#007bff";

/// Palette rendered as buttons on the status page.
pub const PALETTE: [&str; 20] = [
    "#007bff", "#dc3545", "#28a745", "#ffc107", "#17a2b8", //
    "#6f42c1", "#fd7e14", "#343a40", "#6c757d", "#20c997", //
    "#e83e8c", "#6610f2", "#198754", "#0d6efd", "#ff6b6b", //
    "#4dabf7", "#ffcd39", "#00b894", "#1abc9c", "#2ecc71",
];

/// Check `s` against the grammar, reporting why it fails.
pub fn check_color_hex(s: &str) -> Result<(), ColorError> {
    let bytes = s.as_bytes();
    if bytes.len() != 4 && bytes.len() != MAX_COLOR_LEN {
        return Err(ColorError::BadLength);
    }
    if bytes[0] != b'#' {
        return Err(ColorError::MissingHash);
    }
    if !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
        return Err(ColorError::NotHex);
    }
    Ok(())
}

/// `true` iff `s` is `#RGB` or `#RRGGBB`.
pub fn is_valid_color_hex(s: &str) -> bool {
    check_color_hex(s).is_ok()
}

/// A color string that is known to satisfy the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(heapless::String<MAX_COLOR_LEN>);

impl HexColor {
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        check_color_hex(s)?;
        let mut inner = heapless::String::new();
        // Length was checked above.
        inner.push_str(s).map_err(|()| ColorError::BadLength)?;
        Ok(Self(inner))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for HexColor {
    fn default() -> Self {
        let mut inner = heapless::String::new();
        let _ = inner.push_str(DEFAULT_COLOR);
        Self(inner)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
