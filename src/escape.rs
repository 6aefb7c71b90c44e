//! Scheme detection and CGI-style escaping of fully-qualified image paths.
//!
//! When the "image path" is itself a URL (a web proxy source), it is sent as a
//! single opaque path segment: every byte outside `[A-Za-z0-9_.-]` becomes
//! `%XX` with uppercase hex. Spaces are escaped as `%20`, the same form the
//! query string uses, so a path never contains a literal `+` for a space.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Leading `http://` or `https://`, any case.
static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

/// Runs of characters that must be percent-escaped in an opaque segment.
static CHARS_TO_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]+").expect("escape pattern is valid"));

/// Returns true if `path` starts with an `http://` or `https://` scheme.
pub fn is_fully_qualified(path: &str) -> bool {
    SCHEME_PREFIX.is_match(path)
}

/// Removes a leading `http://` / `https://` from a configured host.
pub fn strip_scheme(host: &str) -> &str {
    match SCHEME_PREFIX.find(host) {
        Some(m) => &host[m.end()..],
        None => host,
    }
}

/// Percent-escapes `input` byte by byte, keeping only `[A-Za-z0-9_.-]`.
///
/// Multi-byte UTF-8 characters are escaped per byte, e.g. `é` -> `%C3%A9`.
pub fn cgi_escape(input: &str) -> String {
    CHARS_TO_ESCAPE
        .replace_all(input, |caps: &Captures| {
            let run = &caps[0];
            let mut out = String::with_capacity(run.len() * 3);
            for b in run.bytes() {
                out.push('%');
                out.push_str(&hex::encode_upper([b]));
            }
            out
        })
        .into_owned()
}
