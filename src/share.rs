//! Shareable recipient links.
//!
//! Two link shapes exist: a self-contained one carrying the encoded bouquet
//! in the `d` query parameter, and a registry one carrying only the id. Both
//! may carry `created=true`, which only tells the viewer to show a "copy
//! link" affordance to the creator; it is not part of the bouquet.

#[cfg(test)]
#[path = "share_test.rs"]
mod tests;

/// Query parameter holding the encoded bouquet.
pub const PAYLOAD_PARAM: &str = "d";

/// Self-contained link: `{base}/to/view?d={payload}`. The payload is
/// URL-safe base64, so it needs no further escaping.
#[must_use]
pub fn view_link(base_url: &str, payload: &str, created: bool) -> String {
    let base = base_url.trim_end_matches('/');
    let mut link = format!("{base}/to/view?{PAYLOAD_PARAM}={payload}");
    if created {
        link.push_str("&created=true");
    }
    link
}

/// Registry link: `{base}/to/{id}`. Ids are restricted to the URL-safe
/// alphabet at creation time.
#[must_use]
pub fn registry_link(base_url: &str, id: &str, created: bool) -> String {
    let base = base_url.trim_end_matches('/');
    let mut link = format!("{base}/to/{id}");
    if created {
        link.push_str("?created=true");
    }
    link
}

/// Interpret the `created` query flag. Only the literal `true` counts.
#[must_use]
pub fn created_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}
