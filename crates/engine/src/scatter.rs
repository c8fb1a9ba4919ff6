//! Seeded random scene content.
//!
//! Pure helpers over an explicit `Rng` so scenario tests stay reproducible,
//! plus the startup system that scatters a few bricks on a fresh scene.

use bevy::prelude::*;
use rand::Rng;

use crate::brick::Rotation;
use crate::catalog::{BrickSize, BRICK_CATALOG, CLASSIC_COLORS};
use crate::config::UNIT;
use crate::placement::PlacementEngine;
use crate::rng::BuildRng;

/// Number of bricks scattered on a fresh scene.
const INITIAL_BRICKS: usize = 3;
/// Draws before giving up on a position that keeps validating as blocked.
const MAX_ATTEMPTS: usize = 8;

/// Uniformly random catalog entry.
pub fn random_size(rng: &mut impl Rng) -> BrickSize {
    BRICK_CATALOG[rng.gen_range(0..BRICK_CATALOG.len())]
}

/// Uniformly random classic palette color.
pub fn random_classic_color(rng: &mut impl Rng) -> Color {
    CLASSIC_COLORS[rng.gen_range(0..CLASSIC_COLORS.len())].1.into()
}

/// Arbitrary sRGB color, for random-color placement mode.
pub fn random_any_color(rng: &mut impl Rng) -> Color {
    Color::srgb(rng.gen(), rng.gen(), rng.gen())
}

/// Uniformly random cardinal rotation.
pub fn random_rotation(rng: &mut impl Rng) -> Rotation {
    match rng.gen_range(0..4) {
        0 => Rotation::Deg0,
        1 => Rotation::Deg90,
        2 => Rotation::Deg180,
        _ => Rotation::Deg270,
    }
}

/// Grid-aligned position within a 10x10 grid-unit area around the origin,
/// at floor height.
pub fn random_position(rng: &mut impl Rng) -> Vec3 {
    let x = rng.gen_range(-5..5) as f32 * UNIT;
    let z = rng.gen_range(-5..5) as f32 * UNIT;
    Vec3::new(x, 0.0, z)
}

/// Startup system: scatter starter bricks through the normal snap/validate
/// path so the no-overlap invariant holds from frame zero.
pub fn scatter_initial_bricks(mut engine: ResMut<PlacementEngine>, mut rng: ResMut<BuildRng>) {
    scatter_into(&mut engine, &mut rng.0, INITIAL_BRICKS);
    engine.clear_candidate();
    info!("scattered {} starter bricks", engine.bricks().len());
}

fn scatter_into(engine: &mut PlacementEngine, rng: &mut impl Rng, count: usize) {
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS {
            let size = random_size(rng);
            let rotation = random_rotation(rng);
            let point = random_position(rng);
            let color = random_classic_color(rng);
            if engine.compute_candidate(point, size, rotation).is_some() {
                engine.commit(color);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::BuildRng;

    #[test]
    fn test_scatter_is_deterministic_for_a_seed() {
        let mut a = PlacementEngine::default();
        let mut b = PlacementEngine::default();
        scatter_into(&mut a, &mut BuildRng::from_seed_u64(7).0, 3);
        scatter_into(&mut b, &mut BuildRng::from_seed_u64(7).0, 3);
        assert_eq!(a.bricks().len(), b.bricks().len());
        for (x, y) in a.bricks().iter().zip(b.bricks()) {
            assert_eq!(x.size, y.size);
            assert_eq!(x.position, y.position);
            assert_eq!(x.rotation, y.rotation);
        }
    }

    #[test]
    fn test_scattered_bricks_stay_in_bounds_and_aligned() {
        let mut rng = BuildRng::from_seed_u64(1234).0;
        for _ in 0..100 {
            let pos = random_position(&mut rng);
            assert!(pos.x >= -5.0 * UNIT && pos.x < 5.0 * UNIT);
            assert!(pos.z >= -5.0 * UNIT && pos.z < 5.0 * UNIT);
            assert_eq!(pos.y, 0.0);
        }
    }

    #[test]
    fn test_random_size_draws_from_catalog() {
        let mut rng = BuildRng::from_seed_u64(99).0;
        for _ in 0..50 {
            let size = random_size(&mut rng);
            assert!(BRICK_CATALOG.contains(&size));
        }
    }
}
