use bevy::color::palettes::css;
use bevy::color::Srgba;
use serde::{Deserialize, Serialize};

use crate::config::{BRICK_HEIGHT, PLATE_HEIGHT};

/// Footprint of a brick in grid units, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickSize {
    pub width: u32,
    pub length: u32,
}

impl BrickSize {
    pub const fn new(width: u32, length: u32) -> Self {
        Self { width, length }
    }

    /// Vertical extent: the 2x2 footprint is a plate, everything else is a
    /// full-height brick.
    pub fn height(self) -> f32 {
        if self.width == 2 && self.length == 2 {
            PLATE_HEIGHT
        } else {
            BRICK_HEIGHT
        }
    }

    /// The 1x1 renders as a round cylinder instead of a box.
    pub fn is_round(self) -> bool {
        self.width == 1 && self.length == 1
    }

    pub fn label(self) -> String {
        format!("{}x{}", self.width, self.length)
    }
}

/// The fixed size catalog. Digit keys 1-9 map to indices 0-8.
pub const BRICK_CATALOG: [BrickSize; 9] = [
    BrickSize::new(1, 1),
    BrickSize::new(1, 2),
    BrickSize::new(1, 3),
    BrickSize::new(1, 4),
    BrickSize::new(2, 2),
    BrickSize::new(2, 3),
    BrickSize::new(2, 4),
    BrickSize::new(2, 6),
    BrickSize::new(2, 8),
];

/// Catalog index selected at startup (the 2x2).
pub const DEFAULT_CATALOG_INDEX: usize = 4;

/// Classic named palette used for the swatches and for random brick colors.
pub const CLASSIC_COLORS: [(&str, Srgba); 6] = [
    ("Red", css::RED),
    ("Yellow", css::GOLD),
    ("Blue", css::BLUE),
    ("Green", css::GREEN),
    ("White", css::WHITE),
    ("Black", css::BLACK),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_nine_entries() {
        assert_eq!(BRICK_CATALOG.len(), 9);
        assert_eq!(BRICK_CATALOG[DEFAULT_CATALOG_INDEX], BrickSize::new(2, 2));
    }

    #[test]
    fn test_only_two_by_two_is_plate_height() {
        for size in BRICK_CATALOG {
            if size == BrickSize::new(2, 2) {
                assert_eq!(size.height(), PLATE_HEIGHT);
            } else {
                assert_eq!(size.height(), BRICK_HEIGHT);
            }
        }
    }

    #[test]
    fn test_only_one_by_one_is_round() {
        let round: Vec<BrickSize> = BRICK_CATALOG.into_iter().filter(|s| s.is_round()).collect();
        assert_eq!(round, vec![BrickSize::new(1, 1)]);
    }
}
