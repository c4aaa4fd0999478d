//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling for static responses.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from response content
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check the client's `If-None-Match` header against the server `ETag`
///
/// Handles a single value, a comma-separated list, and the `*` wildcard.
/// Returns true when the client copy is current (answer 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}
