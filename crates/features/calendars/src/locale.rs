//! Minimal `Accept-Language` negotiation.
//!
//! Descriptions are resolved against the request's preferred language; the
//! full RFC 9110 matching machinery is not needed here, only picking the
//! highest-quality concrete tag.

use axum::http::HeaderMap;
use axum::http::header::ACCEPT_LANGUAGE;
use hhub_domain::locale::normalize;

/// Picks the request locale from `Accept-Language`, falling back to
/// `default_locale` when the header is absent or unusable.
pub(crate) fn negotiate(headers: &HeaderMap, default_locale: &str) -> String {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(preferred_tag)
        .unwrap_or_else(|| normalize(default_locale))
}

/// The highest-quality concrete language tag of the header value, ties
/// resolved by listing order. Wildcards and `q=0` entries are ignored.
fn preferred_tag(header: &str) -> Option<String> {
    let mut best: Option<(f32, String)> = None;
    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().map(str::trim).unwrap_or_default();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let quality = parts
            .find_map(|p| p.trim().strip_prefix("q=").map(str::trim).map(str::parse::<f32>))
            .and_then(Result::ok)
            .unwrap_or(1.0);
        if quality <= 0.0 {
            continue;
        }
        if best.as_ref().is_none_or(|(q, _)| quality > *q) {
            best = Some((quality, normalize(tag)));
        }
    }
    best.map(|(_, tag)| tag)
}
