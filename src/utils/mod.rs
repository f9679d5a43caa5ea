//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative href against the page URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Minimal check used by the subscription stub.
///
/// Only requires an `@` with something on both sides; real address
/// validation is out of scope because nothing is ever delivered.
pub fn looks_like_email(input: &str) -> bool {
    let trimmed = input.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}
