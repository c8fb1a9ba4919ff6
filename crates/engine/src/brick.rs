use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::BrickSize;
use crate::config::UNIT;

/// Unique id of a committed brick, assigned from a monotonic counter at
/// commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId(pub u64);

/// Cardinal rotation around the vertical axis. No arbitrary angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Advance by 90 degrees, wrapping past 270 back to 0.
    pub fn step(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> f32 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => 90.0,
            Rotation::Deg180 => 180.0,
            Rotation::Deg270 => 270.0,
        }
    }

    /// Effective footprint: rotations congruent mod 180 share a footprint,
    /// 90/270 swap the axes.
    pub fn footprint(self, size: BrickSize) -> BrickSize {
        match self {
            Rotation::Deg0 | Rotation::Deg180 => size,
            Rotation::Deg90 | Rotation::Deg270 => BrickSize::new(size.length, size.width),
        }
    }
}

/// A committed brick. Created only through a successful commit, removed
/// only through an explicit delete.
#[derive(Debug, Clone)]
pub struct Brick {
    pub id: BrickId,
    pub size: BrickSize,
    /// x/z are half-grid-unit multiples after snapping, y is a stack height.
    pub position: Vec3,
    pub rotation: Rotation,
    pub color: Color,
}

impl Brick {
    /// Effective footprint after rotation.
    pub fn footprint(&self) -> BrickSize {
        self.rotation.footprint(self.size)
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Top surface height in world units.
    pub fn top(&self) -> f32 {
        self.position.y + self.height()
    }

    /// Horizontal half extents of the effective footprint in world units
    /// (x extent, z extent).
    pub fn half_extents(&self) -> Vec2 {
        let fp = self.footprint();
        Vec2::new(
            fp.width as f32 * UNIT / 2.0,
            fp.length as f32 * UNIT / 2.0,
        )
    }
}

/// An ephemeral, uncommitted candidate under the pointer. Recomputed on
/// every pointer move and discarded on commit or invalidation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewBrick {
    pub size: BrickSize,
    pub position: Vec3,
    pub rotation: Rotation,
}

impl PreviewBrick {
    pub fn footprint(&self) -> BrickSize {
        self.rotation.footprint(self.size)
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub fn half_extents(&self) -> Vec2 {
        let fp = self.footprint();
        Vec2::new(
            fp.width as f32 * UNIT / 2.0,
            fp.length as f32 * UNIT / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_after_four_steps() {
        let mut rotation = Rotation::Deg0;
        for _ in 0..4 {
            rotation = rotation.step();
        }
        assert_eq!(rotation, Rotation::Deg0);
    }

    #[test]
    fn test_footprint_swap_is_reversible() {
        let size = BrickSize::new(2, 4);
        assert_eq!(Rotation::Deg0.footprint(size), Rotation::Deg180.footprint(size));
        assert_eq!(Rotation::Deg90.footprint(size), Rotation::Deg270.footprint(size));
        assert_eq!(Rotation::Deg90.footprint(size), BrickSize::new(4, 2));
        // Swapping twice restores the original.
        let swapped = Rotation::Deg90.footprint(size);
        assert_eq!(Rotation::Deg90.footprint(swapped), size);
    }

    #[test]
    fn test_half_extents_follow_rotation() {
        let preview = PreviewBrick {
            size: BrickSize::new(1, 4),
            position: Vec3::ZERO,
            rotation: Rotation::Deg90,
        };
        let half = preview.half_extents();
        assert!((half.x - 4.0 * UNIT / 2.0).abs() < f32::EPSILON);
        assert!((half.y - UNIT / 2.0).abs() < f32::EPSILON);
    }
}
