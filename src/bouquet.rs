//! Bouquet model: placed flower instances, song clips, and the three shapes
//! a bouquet takes on its way from creator to recipient.
//!
//! DESIGN
//! ======
//! `BouquetDraft` is what the creator finalizes from the editing session.
//! `BouquetRecord` is the persisted form kept by the registry, with flowers
//! reduced to id + rounded geometry. `BouquetView` is what a recipient sees:
//! the same content with flower ids resolved against the catalog. Both the
//! registry path and the URL-embedded path end in a `BouquetView`.

#[cfg(test)]
#[path = "bouquet_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, FlowerDefinition};
use crate::consts::{MIN_FLOWERS, MIN_SCALE};

// =============================================================================
// ARRANGED FLOWER
// =============================================================================

/// One placed occurrence of a flower on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangedFlower {
    /// Unique within one arrangement; the same flower may appear many times.
    pub instance_id: String,
    pub flower: &'static FlowerDefinition,
    /// Offset from the canvas centre.
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    /// Higher draws on top. Not required to be unique.
    pub z_index: i32,
}

/// Sparse transform update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl ArrangedFlower {
    /// Apply a partial transform. Scale never drops below [`MIN_SCALE`].
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(scale) = patch.scale {
            self.scale = clamp_scale(scale);
        }
        if let Some(r) = patch.rotation_deg {
            self.rotation_deg = r;
        }
        if let Some(z) = patch.z_index {
            self.z_index = z;
        }
    }
}

/// Enforce the scale floor. NaN collapses to the floor as well.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() { MIN_SCALE } else { scale.max(MIN_SCALE) }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Compact projection of an [`ArrangedFlower`]: flower id plus rounded
/// geometry. Instance ids are dropped and regenerated on rehydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerPlacement {
    pub flower_id: String,
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    #[serde(alias = "rotation")]
    pub rotation_deg: i32,
    pub z_index: i32,
}

impl FlowerPlacement {
    /// Project an instance, rounding positions and rotation to whole units
    /// and scale to two decimals.
    #[must_use]
    pub fn from_instance(flower: &ArrangedFlower) -> Self {
        Self {
            flower_id: flower.flower.id.to_owned(),
            x: round_to_i32(flower.x),
            y: round_to_i32(flower.y),
            scale: round_scale(flower.scale),
            rotation_deg: round_to_i32(flower.rotation_deg),
            z_index: flower.z_index,
        }
    }

    /// Resolve the flower id against the catalog. `None` when the id is no
    /// longer in the catalog; callers drop such placements.
    #[must_use]
    pub fn rehydrate(&self) -> Option<ArrangedFlower> {
        let flower = catalog::find_flower_by_id(&self.flower_id)?;
        Some(ArrangedFlower {
            instance_id: crate::ids::generate_instance_id(),
            flower,
            x: f64::from(self.x),
            y: f64::from(self.y),
            scale: self.scale,
            rotation_deg: f64::from(self.rotation_deg),
            z_index: self.z_index,
        })
    }
}

/// Round to the nearest integer, saturating at the `i32` range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Round a scale to two decimal places.
#[must_use]
pub fn round_scale(scale: f64) -> f64 {
    (scale * 100.0).round() / 100.0
}

/// Rehydrate placements in order, silently dropping unknown flower ids.
#[must_use]
pub fn rehydrate_all(placements: &[FlowerPlacement]) -> Vec<ArrangedFlower> {
    placements.iter().filter_map(FlowerPlacement::rehydrate).collect()
}

// =============================================================================
// SONG
// =============================================================================

/// A clip of an external track. `end_seconds == 0` means "play to the end".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongClip {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "start")]
    pub start_seconds: u32,
    #[serde(default, alias = "end")]
    pub end_seconds: u32,
}

// =============================================================================
// DRAFT / RECORD / VIEW
// =============================================================================

/// A finalized bouquet on the creator side, ready to encode or persist.
#[derive(Debug, Clone, PartialEq)]
pub struct BouquetDraft {
    pub flowers: Vec<ArrangedFlower>,
    pub message: String,
    pub to: String,
    pub from: String,
    pub song: SongClip,
    pub background: String,
    pub wrap: String,
}

/// A bouquet as persisted by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BouquetRecord {
    pub id: String,
    pub flowers: Vec<FlowerPlacement>,
    pub message: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub song: SongClip,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_wrap")]
    pub wrap: String,
    pub created_at: String,
}

impl BouquetRecord {
    /// Build a registry record from a finalized draft.
    #[must_use]
    pub fn from_draft(id: String, draft: &BouquetDraft, created_at: String) -> Self {
        Self {
            id,
            flowers: draft.flowers.iter().map(FlowerPlacement::from_instance).collect(),
            message: draft.message.clone(),
            to: draft.to.clone(),
            from: draft.from.clone(),
            song: draft.song.clone(),
            background: draft.background.clone(),
            wrap: draft.wrap.clone(),
            created_at,
        }
    }

    /// Resolve the record into what the recipient sees.
    #[must_use]
    pub fn to_view(&self) -> BouquetView {
        BouquetView {
            flowers: rehydrate_all(&self.flowers),
            message: self.message.clone(),
            to: self.to.clone(),
            from: self.from.clone(),
            song: self.song.clone(),
            background: self.background.clone(),
            wrap: self.wrap.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// The recipient-side bouquet with flowers resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BouquetView {
    pub flowers: Vec<ArrangedFlower>,
    pub message: String,
    pub to: String,
    pub from: String,
    pub song: SongClip,
    pub background: String,
    pub wrap: String,
    pub created_at: String,
}

impl BouquetView {
    /// Flowers sorted back-to-front for drawing. Ties keep arrangement order.
    #[must_use]
    pub fn draw_order(&self) -> Vec<&ArrangedFlower> {
        let mut flowers: Vec<&ArrangedFlower> = self.flowers.iter().collect();
        flowers.sort_by_key(|f| f.z_index);
        flowers
    }
}

pub(crate) fn default_background() -> String {
    catalog::DEFAULT_BACKGROUND.to_owned()
}

pub(crate) fn default_wrap() -> String {
    catalog::NO_WRAP.to_owned()
}

/// Current time as an RFC 3339 string. Falls back to the Unix epoch if the
/// clock cannot be formatted.
#[must_use]
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_owned())
}

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please select at least {min} flowers (got {count})")]
    TooFewFlowers { count: usize, min: usize },
    #[error("message is required")]
    EmptyMessage,
    #[error("invalid custom link: {0:?}")]
    InvalidSlug(String),
}

/// Check the finalization rules: at least [`MIN_FLOWERS`] flowers and a
/// message that is not blank.
///
/// # Errors
///
/// Returns the first rule that fails.
pub fn validate_submission(flower_count: usize, message: &str) -> Result<(), ValidationError> {
    if flower_count < MIN_FLOWERS {
        return Err(ValidationError::TooFewFlowers { count: flower_count, min: MIN_FLOWERS });
    }
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

/// Truncate to at most `max` characters (not bytes).
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
