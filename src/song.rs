//! Song clip helpers: track id extraction, `mm:ss` conversion, embed links.
//!
//! Playback itself is left to the embedded third-party player; this module
//! only prepares the link and offsets the player needs.

#[cfg(test)]
#[path = "song_test.rs"]
mod tests;

const TRACK_MARKER: &str = "track/";
const EMBED_BASE: &str = "https://open.spotify.com/embed/track/";

/// Extract the track id from a Spotify track link such as
/// `https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=...`.
#[must_use]
pub fn extract_track_id(url: &str) -> Option<&str> {
    let start = url.find(TRACK_MARKER)? + TRACK_MARKER.len();
    let rest = &url[start..];
    let end = rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(rest.len());
    let id = &rest[..end];
    (!id.is_empty()).then_some(id)
}

/// Parse `mm:ss` into seconds. Anything else is 0.
#[must_use]
pub fn mmss_to_seconds(raw: &str) -> u32 {
    let Some((minutes, seconds)) = raw.trim().split_once(':') else {
        return 0;
    };
    let (Ok(minutes), Ok(seconds)) = (minutes.trim().parse::<u32>(), seconds.trim().parse::<u32>()) else {
        return 0;
    };
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// Format seconds as zero-padded `mm:ss`.
#[must_use]
pub fn seconds_to_mmss(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Embed player URL for a track link, starting at `start_seconds`.
#[must_use]
pub fn embed_url(track_url: &str, start_seconds: u32) -> Option<String> {
    let id = extract_track_id(track_url)?;
    Some(format!("{EMBED_BASE}{id}?utm_source=generator&t={start_seconds}"))
}
