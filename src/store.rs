//! Arrangement store: the mutable state of one bouquet editing session.
//!
//! DESIGN
//! ======
//! One `ArrangementStore` exists per active editing session and is passed by
//! reference to whatever drives the UI. It owns the picker selection, the
//! placed instances on the canvas, and the message/song/background/wrap
//! choices. Every mutation is a plain `&mut self` method; lookups by an
//! unknown instance id are silent no-ops.
//!
//! Two policies are intentional and must not drift:
//! - the selection is capped at [`MAX_SELECTED_FLOWERS`]; extra picks are dropped,
//! - `remove_flower` removes the most recently picked match (LIFO per id).

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use crate::arrange::arrange;
use crate::bouquet::{
    self, ArrangedFlower, BouquetDraft, SongClip, TransformPatch, ValidationError, clamp_scale, truncate_chars,
};
use crate::catalog::{DEFAULT_BACKGROUND, FlowerDefinition, NO_WRAP};
use crate::consts::{FOLIAGE_SCALE, FOLIAGE_Z_INDEX, MAX_MESSAGE_CHARS, MAX_NAME_CHARS, MAX_SELECTED_FLOWERS};
use crate::ids::generate_instance_id;

/// Mutable state for one editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrangementStore {
    selected_flowers: Vec<&'static FlowerDefinition>,
    arranged_flowers: Vec<ArrangedFlower>,
    message: String,
    to: String,
    from: String,
    song: SongClip,
    background: String,
    wrap: String,
}

impl ArrangementStore {
    /// Create an empty session with default background and no wrap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected_flowers: Vec::new(),
            arranged_flowers: Vec::new(),
            message: String::new(),
            to: String::new(),
            from: String::new(),
            song: SongClip::default(),
            background: DEFAULT_BACKGROUND.to_owned(),
            wrap: NO_WRAP.to_owned(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn selected_flowers(&self) -> &[&'static FlowerDefinition] {
        &self.selected_flowers
    }

    #[must_use]
    pub fn arranged_flowers(&self) -> &[ArrangedFlower] {
        &self.arranged_flowers
    }

    #[must_use]
    pub fn instance(&self, instance_id: &str) -> Option<&ArrangedFlower> {
        self.arranged_flowers.iter().find(|f| f.instance_id == instance_id)
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    #[must_use]
    pub fn song(&self) -> &SongClip {
        &self.song
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }

    #[must_use]
    pub fn wrap(&self) -> &str {
        &self.wrap
    }

    /// Highest z-index on the canvas, floored at 0. An empty canvas or one
    /// where every instance sits below 0 reports 0.
    #[must_use]
    pub fn max_z_index(&self) -> i32 {
        self.arranged_flowers.iter().map(|f| f.z_index).max().unwrap_or(0).max(0)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Pick a flower. Ignored once the selection is full.
    pub fn add_flower(&mut self, flower: &'static FlowerDefinition) {
        if self.selected_flowers.len() >= MAX_SELECTED_FLOWERS {
            return;
        }
        self.selected_flowers.push(flower);
    }

    /// Unpick the most recently picked flower with this id.
    pub fn remove_flower(&mut self, id: &str) {
        if let Some(idx) = self.selected_flowers.iter().rposition(|f| f.id == id) {
            self.selected_flowers.remove(idx);
        }
    }

    // -------------------------------------------------------------------------
    // Canvas
    // -------------------------------------------------------------------------

    /// Replace the whole arrangement.
    pub fn set_arrangement(&mut self, flowers: Vec<ArrangedFlower>) {
        self.arranged_flowers = flowers;
    }

    /// Lay out the current selection from scratch.
    pub fn auto_arrange(&mut self) {
        let layout = arrange(&self.selected_flowers);
        self.set_arrangement(layout);
    }

    /// Merge a partial transform into an instance.
    pub fn update_transform(&mut self, instance_id: &str, patch: &TransformPatch) {
        if let Some(flower) = self.instance_mut(instance_id) {
            flower.apply(patch);
        }
    }

    pub fn remove_instance(&mut self, instance_id: &str) {
        self.arranged_flowers.retain(|f| f.instance_id != instance_id);
    }

    /// Place a new instance at the canvas origin.
    ///
    /// Foliage goes behind everything: it is inserted first, every existing
    /// instance moves up one z-level, and the new instance ends strictly below
    /// all of them. Other flowers come to the front with `max + 1`.
    pub fn add_instance(&mut self, flower: &'static FlowerDefinition) -> &ArrangedFlower {
        let mut instance = ArrangedFlower {
            instance_id: generate_instance_id(),
            flower,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation_deg: 0.0,
            z_index: 0,
        };

        if flower.tier.is_foliage() {
            let floor = self.arranged_flowers.iter().map(|f| f.z_index).min().unwrap_or(FOLIAGE_Z_INDEX);
            instance.scale = FOLIAGE_SCALE;
            instance.z_index = floor.min(FOLIAGE_Z_INDEX);
            for existing in &mut self.arranged_flowers {
                existing.z_index = existing.z_index.saturating_add(1);
            }
            self.arranged_flowers.insert(0, instance);
            &self.arranged_flowers[0]
        } else {
            instance.z_index = self.max_z_index().saturating_add(1);
            self.arranged_flowers.push(instance);
            let last = self.arranged_flowers.len() - 1;
            &self.arranged_flowers[last]
        }
    }

    /// Grow or shrink by `1 + factor`, never below the scale floor.
    pub fn scale_by(&mut self, instance_id: &str, factor: f64) {
        if let Some(flower) = self.instance_mut(instance_id) {
            flower.scale = clamp_scale(flower.scale * (1.0 + factor));
        }
    }

    pub fn rotate_by(&mut self, instance_id: &str, degrees: f64) {
        if let Some(flower) = self.instance_mut(instance_id) {
            flower.rotation_deg += degrees;
        }
    }

    /// Move by a drag offset already converted to canvas units.
    pub fn translate_by(&mut self, instance_id: &str, dx: f64, dy: f64) {
        if let Some(flower) = self.instance_mut(instance_id) {
            flower.x += dx;
            flower.y += dy;
        }
    }

    pub fn bring_to_front(&mut self, instance_id: &str) {
        let top = self.max_z_index().saturating_add(1);
        if let Some(flower) = self.instance_mut(instance_id) {
            flower.z_index = top;
        }
    }

    fn instance_mut(&mut self, instance_id: &str) -> Option<&mut ArrangedFlower> {
        self.arranged_flowers.iter_mut().find(|f| f.instance_id == instance_id)
    }

    // -------------------------------------------------------------------------
    // Message, song, appearance
    // -------------------------------------------------------------------------

    /// Set the message, cut to [`MAX_MESSAGE_CHARS`] characters.
    pub fn set_message(&mut self, message: &str) {
        self.message = truncate_chars(message, MAX_MESSAGE_CHARS);
    }

    /// Set both names, each cut to [`MAX_NAME_CHARS`] characters.
    pub fn set_names(&mut self, to: &str, from: &str) {
        self.to = truncate_chars(to, MAX_NAME_CHARS);
        self.from = truncate_chars(from, MAX_NAME_CHARS);
    }

    pub fn set_song(&mut self, song: SongClip) {
        self.song = song;
    }

    pub fn set_background(&mut self, background: &str) {
        self.background = background.to_owned();
    }

    pub fn set_wrap(&mut self, wrap: &str) {
        self.wrap = wrap.to_owned();
    }

    /// Reset the whole session.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Snapshot the session as a draft, without validation.
    #[must_use]
    pub fn draft(&self) -> BouquetDraft {
        BouquetDraft {
            flowers: self.arranged_flowers.clone(),
            message: self.message.clone(),
            to: self.to.clone(),
            from: self.from.clone(),
            song: self.song.clone(),
            background: self.background.clone(),
            wrap: self.wrap.clone(),
        }
    }

    /// Validate and snapshot the session for sharing.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when fewer than three flowers are on
    /// the canvas or the message is blank. The session is left untouched.
    pub fn finalize(&self) -> Result<BouquetDraft, ValidationError> {
        bouquet::validate_submission(self.arranged_flowers.len(), &self.message)?;
        Ok(self.draft())
    }
}

impl Default for ArrangementStore {
    fn default() -> Self {
        Self::new()
    }
}
