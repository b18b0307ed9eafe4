//! Auto-arranger: initial radial layout for the selected flowers.
//!
//! The i-th selected flower takes the i-th slot of a fixed table tuned for a
//! balanced bouquet silhouette. Flowers past the end of the table fall back
//! to slot 0. Foliage ignores the slot's stacking and scale: it always sits
//! at the back, enlarged, as a background accent.

#[cfg(test)]
#[path = "arrange_test.rs"]
mod tests;

use crate::bouquet::ArrangedFlower;
use crate::catalog::FlowerDefinition;
use crate::consts::{FOLIAGE_SCALE, FOLIAGE_Z_INDEX};
use crate::ids::generate_instance_id;

/// One position in the layout table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSlot {
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub z_index: i32,
    pub scale: f64,
}

const fn slot(x: f64, y: f64, rotation_deg: f64, z_index: i32, scale: f64) -> LayoutSlot {
    LayoutSlot { x, y, rotation_deg, z_index, scale }
}

/// Centre, shoulders, inner pair, outer wings, base.
pub const LAYOUT_SLOTS: [LayoutSlot; 8] = [
    slot(0.0, -20.0, -5.0, 10, 1.0),
    slot(-70.0, 10.0, -18.0, 8, 0.92),
    slot(70.0, 10.0, 18.0, 8, 0.92),
    slot(-40.0, 40.0, -8.0, 9, 0.96),
    slot(40.0, 40.0, 8.0, 9, 0.96),
    slot(-110.0, 30.0, -25.0, 7, 0.85),
    slot(110.0, 30.0, 25.0, 7, 0.85),
    slot(0.0, 60.0, 0.0, 11, 0.9),
];

/// Slot used for the flower at `index`.
#[must_use]
pub fn slot_for(index: usize) -> &'static LayoutSlot {
    LAYOUT_SLOTS.get(index).unwrap_or(&LAYOUT_SLOTS[0])
}

/// Lay out flowers in selection order. Geometry is a pure function of the
/// input; every call mints fresh instance ids.
#[must_use]
pub fn arrange(flowers: &[&'static FlowerDefinition]) -> Vec<ArrangedFlower> {
    flowers
        .iter()
        .enumerate()
        .map(|(i, &flower)| {
            let slot = slot_for(i);
            let (z_index, scale) = if flower.tier.is_foliage() {
                (FOLIAGE_Z_INDEX, slot.scale * FOLIAGE_SCALE)
            } else {
                (slot.z_index, slot.scale)
            };
            ArrangedFlower {
                instance_id: generate_instance_id(),
                flower,
                x: slot.x,
                y: slot.y,
                scale,
                rotation_deg: slot.rotation_deg,
                z_index,
            }
        })
        .collect()
}
