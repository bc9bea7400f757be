//! Fuzz target: `url_decode` / `parse_pairs`
//!
//! The form decoder is shared by query strings and form bodies and sees
//! raw client input. It must be total and never grow its input.
//!
//! cargo fuzz run fuzz_form_decoder

#![no_main]

use apmonitor::http::form::{parse_pairs, url_decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Each escape shrinks three bytes to one; lossy replacement of an
    // invalid byte costs at most three.
    let decoded = url_decode(text);
    assert!(decoded.len() <= text.len() * 3);

    let segments = text.split('&').filter(|s| !s.is_empty()).count();
    assert_eq!(parse_pairs(text).len(), segments);
});
