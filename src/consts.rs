//! Shared limits for bouquet composition.

// ── Selection ───────────────────────────────────────────────────

/// Fewest flowers a bouquet may be finalized with.
pub const MIN_FLOWERS: usize = 3;

/// Most flowers the picker step will hold. Extra picks are ignored.
pub const MAX_SELECTED_FLOWERS: usize = 20;

// ── Text ────────────────────────────────────────────────────────

/// Message length cap, in characters.
pub const MAX_MESSAGE_CHARS: usize = 300;

/// Cap for the `to` and `from` names, in characters.
pub const MAX_NAME_CHARS: usize = 60;

// ── Geometry ────────────────────────────────────────────────────

/// Smallest scale a placed flower can be shrunk to.
pub const MIN_SCALE: f64 = 0.2;

/// Scale multiplier applied to foliage over the base slot scale.
pub const FOLIAGE_SCALE: f64 = 1.5;

/// Default stacking order for foliage; below every auto-layout slot.
pub const FOLIAGE_Z_INDEX: i32 = 1;
