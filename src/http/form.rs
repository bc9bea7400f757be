//! `application/x-www-form-urlencoded` decoding, shared by query strings
//! and form bodies.

/// Decode `+` as space and `%XX` escapes. Malformed escapes are kept
/// literally; invalid UTF-8 is replaced with U+FFFD.
pub fn url_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Split `a=1&b=2` into decoded, ordered pairs. Empty segments are skipped;
/// a segment without `=` yields an empty value.
pub fn parse_pairs(s: &str) -> Vec<(String, String)> {
    s.split('&')
        .filter(|seg| !seg.is_empty())
        .map(|seg| match seg.split_once('=') {
            Some((k, v)) => (url_decode(k), url_decode(v)),
            None => (url_decode(seg), String::new()),
        })
        .collect()
}
