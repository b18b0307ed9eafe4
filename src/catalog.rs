//! Static flower catalog: flower definitions, backgrounds, and wraps.
//!
//! DESIGN
//! ======
//! The catalog is compiled into the binary. Transport records and the
//! registry only ever carry a flower `id`; everything else shown to a
//! recipient is looked up here at decode time, so a shared link always
//! renders with the current catalog metadata.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Default canvas background (paper cream).
pub const DEFAULT_BACKGROUND: &str = "#FAF7F2";

/// Wrap id meaning "no decorative wrap".
pub const NO_WRAP: &str = "none";

// =============================================================================
// TYPES
// =============================================================================

/// Layout role of a flower. Governs default stacking and scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tall,
    Medium,
    Small,
    /// Background greenery; always drawn behind blooms.
    Foliage,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tall => "tall",
            Self::Medium => "medium",
            Self::Small => "small",
            Self::Foliage => "foliage",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tall" => Some(Self::Tall),
            "medium" => Some(Self::Medium),
            "small" => Some(Self::Small),
            "foliage" => Some(Self::Foliage),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_foliage(self) -> bool {
        self == Self::Foliage
    }
}

/// One entry in the flower catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowerDefinition {
    /// Globally unique key; the only field that travels in a transport record.
    pub id: &'static str,
    pub display_name: &'static str,
    pub color_label: &'static str,
    pub meaning: &'static str,
    /// Opaque asset path for the flower image.
    pub image_ref: &'static str,
    /// Hex swatch shown in pickers.
    pub swatch_color: &'static str,
    pub tier: Tier,
}

/// A selectable canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Background {
    pub id: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

/// A decorative wrap drawn around the bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wrap {
    pub id: &'static str,
    pub label: &'static str,
    /// Asset path, empty for the "no wrap" entry.
    pub image_ref: &'static str,
}

// =============================================================================
// DATA
// =============================================================================

const fn flower(
    id: &'static str,
    display_name: &'static str,
    color_label: &'static str,
    meaning: &'static str,
    image_ref: &'static str,
    swatch_color: &'static str,
    tier: Tier,
) -> FlowerDefinition {
    FlowerDefinition { id, display_name, color_label, meaning, image_ref, swatch_color, tier }
}

/// Every flower and foliage definition, in picker order.
pub static FLOWERS: &[FlowerDefinition] = &[
    // Foliage and fillers.
    flower("foliage-1", "Sage Spray", "Dusty Green", "Support", "/flowers/1.webp", "#A8B5A2", Tier::Foliage),
    flower("foliage-2", "Eucalyptus", "Silver Green", "Growth", "/flowers/2.webp", "#94a89a", Tier::Foliage),
    flower("foliage-3", "Olive Branch", "Deep Sage", "Peace", "/flowers/3.webp", "#7c8c7c", Tier::Foliage),
    flower("foliage-4", "Wild Fern", "Muted Olive", "Sincerity", "/flowers/4.png", "#8ea38e", Tier::Foliage),
    flower("foliage-5", "Meadow Grass", "Soft Sage", "Connection", "/flowers/5.png", "#b5c4b5", Tier::Foliage),
    // Blooms.
    flower("rose", "Rose", "Pink / Red", "Love & Passion", "/flowers/rose.webp", "#d4707e", Tier::Medium),
    flower("tulip", "Tulip", "Yellow / Pink", "Cheerfulness", "/flowers/tulip.webp", "#f0b840", Tier::Medium),
    flower("lily", "Lily", "White / Blush", "Purity", "/flowers/lily.webp", "#f0dece", Tier::Tall),
    flower("orchid", "Orchid", "Purple / Lavender", "Admiration", "/flowers/orchid.webp", "#a060c0", Tier::Tall),
    flower("peony", "Peony", "Soft Pink", "Romance", "/flowers/peony.webp", "#e898a8", Tier::Medium),
    flower("daisy", "Daisy", "White / Yellow", "Innocence", "/flowers/daisy.webp", "#f0c840", Tier::Small),
    flower("carnation", "Carnation", "Pink / Red", "Deep Love", "/flowers/carnation.webp", "#d87088", Tier::Small),
    flower("chrysanthemum", "Chrysanthemum", "Yellow / Gold", "Joy", "/flowers/chrysanthemum.webp", "#d89810", Tier::Medium),
    flower("sunflower", "Sunflower", "Bright Yellow", "Adoration", "/flowers/sunflower.png", "#ffc800", Tier::Tall),
    flower("lotus", "Lotus", "White / Pink", "Rebirth", "/flowers/lotus.webp", "#fce4ec", Tier::Small),
    flower("camellia", "Camellia", "Pink / White", "Longing", "/flowers/camellia.webp", "#f48fb1", Tier::Medium),
    flower("anemone", "Anemone", "White / Dark Center", "Protection", "/flowers/anemone.png", "#ffffff", Tier::Small),
];

pub static BACKGROUNDS: &[Background] = &[
    Background { id: "cream", value: DEFAULT_BACKGROUND, label: "Paper Cream" },
    Background { id: "blush", value: "#F2C4CE", label: "Soft Blush" },
    Background { id: "sage", value: "#A8B5A2", label: "Dusty Sage" },
    Background { id: "dark", value: "#2C2420", label: "Midnight Coffee" },
];

pub static WRAPS: &[Wrap] = &[
    Wrap { id: NO_WRAP, label: "No Wrap", image_ref: "" },
    Wrap { id: "kraft", label: "Kraft Paper", image_ref: "/wraps/kraft.webp" },
    Wrap { id: "linen", label: "Linen Cloth", image_ref: "/wraps/linen.webp" },
    Wrap { id: "newsprint", label: "Newsprint", image_ref: "/wraps/newsprint.webp" },
];

// =============================================================================
// LOOKUP
// =============================================================================

/// Look up a flower definition by id.
#[must_use]
pub fn find_flower_by_id(id: &str) -> Option<&'static FlowerDefinition> {
    FLOWERS.iter().find(|f| f.id == id)
}

/// All flowers in catalog order.
#[must_use]
pub fn all_flowers() -> &'static [FlowerDefinition] {
    FLOWERS
}

/// Flowers of a single tier, in catalog order.
pub fn flowers_by_tier(tier: Tier) -> impl Iterator<Item = &'static FlowerDefinition> {
    FLOWERS.iter().filter(move |f| f.tier == tier)
}

/// Look up a wrap by id. The `"none"` sentinel resolves to the empty wrap.
#[must_use]
pub fn find_wrap(id: &str) -> Option<&'static Wrap> {
    WRAPS.iter().find(|w| w.id == id)
}

/// Whether a background value is a plain hex colour rather than an image asset.
#[must_use]
pub fn is_color_background(value: &str) -> bool {
    value.starts_with('#')
}
