//! Bouquet codec: compact transport record <-> URL-safe base64 string.
//!
//! DESIGN
//! ======
//! The compact record uses one- and two-letter keys and rounded geometry so
//! a whole bouquet fits in a single query parameter:
//!
//! ```text
//! {"f":[{"i":"rose","x":0,"y":-20,"s":1.0,"r":-5,"z":10}],
//!  "m":"...","t":"...","fr":"...","s":{"u":"...","st":0,"en":0},
//!  "b":"#FAF7F2","w":"none"}
//! ```
//!
//! The JSON text is UTF-8 encoded and then base64 encoded with the URL-safe
//! alphabet and no padding.
//!
//! ERROR HANDLING
//! ==============
//! Decoding goes through an explicit schema in which every field has a
//! total default: a missing or `null` field never fails the decode. Only an
//! absent payload, bad base64, non-UTF-8 bytes, or JSON that does not fit the
//! schema produce a [`DecodeError`]. Flower ids that are no longer in the
//! catalog are dropped one by one; the rest of the bouquet survives.

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize};

use crate::bouquet::{
    self, BouquetDraft, BouquetRecord, BouquetView, FlowerPlacement, SongClip, round_scale, round_to_i32,
};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("bouquet payload is missing")]
    Missing,
    #[error("bouquet payload is not valid base64: {0}")]
    Transport(#[from] base64::DecodeError),
    #[error("bouquet payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("bouquet payload has an unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

// =============================================================================
// COMPACT SCHEMA
// =============================================================================

/// One placed flower in compact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactFlower {
    /// Flower id. An empty id never resolves and is dropped on rehydration.
    #[serde(default, deserialize_with = "lenient_string")]
    pub i: String,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub x: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub y: i32,
    #[serde(default = "default_scale", deserialize_with = "lenient_scale")]
    pub s: f64,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub r: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub z: i32,
}

/// Song clip in compact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSong {
    #[serde(default, deserialize_with = "lenient_string")]
    pub u: String,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub st: u32,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub en: u32,
}

/// The whole bouquet in compact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactBouquet {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub f: Vec<CompactFlower>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub m: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub t: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fr: String,
    #[serde(default, deserialize_with = "lenient_song")]
    pub s: CompactSong,
    /// Background; blank means the default cream.
    #[serde(default, deserialize_with = "lenient_string")]
    pub b: String,
    /// Wrap id; blank means no wrap.
    #[serde(default, deserialize_with = "lenient_string")]
    pub w: String,
    /// Creation timestamp, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
}

fn default_scale() -> f64 {
    1.0
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.map_or(0, round_to_i32))
}

fn lenient_scale<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.map_or(1.0, round_scale))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let secs = Option::<f64>::deserialize(d)?.unwrap_or(0.0);
    if secs.is_nan() || secs <= 0.0 {
        return Ok(0);
    }
    Ok(secs.round().min(f64::from(u32::MAX)) as u32)
}

fn lenient_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<CompactFlower>, D::Error> {
    Ok(Option::<Vec<CompactFlower>>::deserialize(d)?.unwrap_or_default())
}

fn lenient_song<'de, D: Deserializer<'de>>(d: D) -> Result<CompactSong, D::Error> {
    Ok(Option::<CompactSong>::deserialize(d)?.unwrap_or_default())
}

impl From<&FlowerPlacement> for CompactFlower {
    fn from(p: &FlowerPlacement) -> Self {
        Self { i: p.flower_id.clone(), x: p.x, y: p.y, s: p.scale, r: p.rotation_deg, z: p.z_index }
    }
}

impl From<&CompactFlower> for FlowerPlacement {
    fn from(c: &CompactFlower) -> Self {
        Self { flower_id: c.i.clone(), x: c.x, y: c.y, scale: c.s, rotation_deg: c.r, z_index: c.z }
    }
}

impl From<&SongClip> for CompactSong {
    fn from(song: &SongClip) -> Self {
        Self { u: song.url.clone(), st: song.start_seconds, en: song.end_seconds }
    }
}

impl From<CompactSong> for SongClip {
    fn from(song: CompactSong) -> Self {
        Self { url: song.u, start_seconds: song.st, end_seconds: song.en }
    }
}

impl CompactBouquet {
    /// Project a draft. Geometry is rounded; instance ids and every catalog
    /// field except the flower id are dropped.
    #[must_use]
    pub fn from_draft(draft: &BouquetDraft) -> Self {
        Self {
            f: draft
                .flowers
                .iter()
                .map(|f| CompactFlower::from(&FlowerPlacement::from_instance(f)))
                .collect(),
            m: draft.message.clone(),
            t: draft.to.clone(),
            fr: draft.from.clone(),
            s: CompactSong::from(&draft.song),
            b: draft.background.clone(),
            w: draft.wrap.clone(),
            c: None,
        }
    }

    /// Project a stored registry record, keeping its creation time.
    #[must_use]
    pub fn from_record(record: &BouquetRecord) -> Self {
        Self {
            f: record.flowers.iter().map(CompactFlower::from).collect(),
            m: record.message.clone(),
            t: record.to.clone(),
            fr: record.from.clone(),
            s: CompactSong::from(&record.song),
            b: record.background.clone(),
            w: record.wrap.clone(),
            c: Some(record.created_at.clone()),
        }
    }

    /// Resolve into a recipient view. Unknown flower ids are dropped and
    /// blank background/wrap fall back to their defaults.
    #[must_use]
    pub fn rehydrate(self) -> BouquetView {
        let placements: Vec<FlowerPlacement> = self.f.iter().map(FlowerPlacement::from).collect();
        BouquetView {
            flowers: bouquet::rehydrate_all(&placements),
            message: self.m,
            to: self.t,
            from: self.fr,
            song: SongClip::from(self.s),
            background: non_blank_or(self.b, bouquet::default_background),
            wrap: non_blank_or(self.w, bouquet::default_wrap),
            created_at: self.c.unwrap_or_else(bouquet::now_rfc3339),
        }
    }
}

fn non_blank_or(value: String, default: fn() -> String) -> String {
    if value.trim().is_empty() { default() } else { value }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Encode a draft into the URL-embeddable transport string.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn encode(draft: &BouquetDraft) -> Result<String, serde_json::Error> {
    encode_compact(&CompactBouquet::from_draft(draft))
}

/// Encode an already-compacted record.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn encode_compact(compact: &CompactBouquet) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(compact)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a transport string into the compact schema without touching the
/// catalog.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_compact(input: Option<&str>) -> Result<CompactBouquet, DecodeError> {
    // No trim: a trailing space is a mangled `+`.
    let raw = input.filter(|s| !s.trim().is_empty()).ok_or(DecodeError::Missing)?;
    let bytes = URL_SAFE_NO_PAD.decode(normalize_transport(raw))?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decode a transport string into a recipient view.
///
/// # Errors
///
/// See [`DecodeError`]. Unknown flower ids are not an error.
pub fn decode(input: Option<&str>) -> Result<BouquetView, DecodeError> {
    decode_compact(input).map(CompactBouquet::rehydrate)
}

/// Map any base64 dialect onto the URL-safe, unpadded alphabet. Standard
/// base64 shows up in older links, and a `+` that went through query-string
/// decoding arrives as a space.
fn normalize_transport(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '+' | ' ' => Some('-'),
            '/' => Some('_'),
            '=' | '\n' | '\r' | '\t' => None,
            other => Some(other),
        })
        .collect()
}
