//! Input constraints for the editing controls.
//!
//! The text sanitizers run inside the `DesignPatch` text builders; placement
//! clamping runs in `DesignEditStore::set_placement`.

use kit_core::{Bounded, Placement, Vec3};

use crate::DecalSlot;

pub const NAME_MAX_CHARS: usize = 15;
pub const NUMBER_MAX_DIGITS: usize = 2;

/// Slider ranges for one decal slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementLimits {
    pub x: Bounded,
    pub y: Bounded,
    pub scale: Bounded,
}

const HORIZONTAL: Bounded = Bounded {
    value: 0.0,
    min: -1.0,
    max: 1.0,
};

const VERTICAL: Bounded = Bounded {
    value: 0.0,
    min: -1.0,
    max: 2.0,
};

impl PlacementLimits {
    pub fn for_slot(slot: DecalSlot) -> Self {
        let (min, max) = match slot {
            DecalSlot::Logo => (0.1, 1.0),
            DecalSlot::Name => (0.05, 0.5),
            DecalSlot::Number => (0.1, 1.0),
        };
        Self {
            x: HORIZONTAL,
            y: VERTICAL,
            scale: Bounded {
                value: min,
                min,
                max,
            },
        }
    }
}

/// Pull x, y and scale into the slot's ranges. Depth is left alone; it only
/// picks the face.
pub fn clamp_placement(slot: DecalSlot, placement: Placement) -> Placement {
    let limits = PlacementLimits::for_slot(slot);
    Placement {
        position: Vec3::new(
            limits.x.with_value(placement.position.x).value,
            limits.y.with_value(placement.position.y).value,
            placement.position.z,
        ),
        scale: limits.scale.with_value(placement.scale).value,
    }
}

/// Trim and cap the player name.
pub fn sanitize_name(input: &str) -> String {
    input.trim().chars().take(NAME_MAX_CHARS).collect()
}

/// Keep only digits, at most two of them.
pub fn sanitize_number(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(NUMBER_MAX_DIGITS)
        .collect()
}
