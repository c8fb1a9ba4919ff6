//! Grid snapping, occupancy validation, and the commit/select/delete
//! lifecycle. This is the core of the building toy: everything else in the
//! workspace is presentation glue around [`PlacementEngine`].

use bevy::prelude::*;

use crate::brick::{Brick, BrickId, PreviewBrick, Rotation};
use crate::catalog::BrickSize;
use crate::config::{BASEPLATE_EXTENT, EPSILON, UNIT};

/// Placement lifecycle state, driven by pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    /// No candidate under the pointer.
    #[default]
    Idle,
    /// A candidate exists and passed validation.
    PreviewValid,
    /// A candidate exists but failed validation. Not rendered.
    PreviewInvalid,
}

/// Owns the committed brick set, the selection, and the current candidate,
/// and exposes the whole operation contract of the toy. No ambient state:
/// input systems feed events in as plain method calls.
///
/// Validation scans the full committed set on every recomputation; at toy
/// scale (tens of bricks) a spatial index would be overkill.
#[derive(Resource, Default)]
pub struct PlacementEngine {
    bricks: Vec<Brick>,
    selection: Option<BrickId>,
    candidate: Option<PreviewBrick>,
    state: PlacementState,
    next_id: u64,
}

impl PlacementEngine {
    /// Committed bricks in insertion order, for deterministic rendering.
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    pub fn selection(&self) -> Option<BrickId> {
        self.selection
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// The current candidate, whether or not it validated.
    pub fn candidate(&self) -> Option<&PreviewBrick> {
        self.candidate.as_ref()
    }

    /// Snap a raw point to the grid, validate the result, and remember it
    /// as the current candidate. Returns the candidate only when it is
    /// legally placeable.
    pub fn compute_candidate(
        &mut self,
        point: Vec3,
        size: BrickSize,
        rotation: Rotation,
    ) -> Option<&PreviewBrick> {
        let position = self.snap_to_grid(point, size, rotation);
        let preview = PreviewBrick {
            size,
            position,
            rotation,
        };
        let blocked = self.is_occupied(&preview) || self.is_one_by_two_adjacent(&preview);
        self.candidate = Some(preview);
        self.state = if blocked {
            PlacementState::PreviewInvalid
        } else {
            PlacementState::PreviewValid
        };
        if blocked {
            None
        } else {
            self.candidate.as_ref()
        }
    }

    /// Drop the candidate: the pointer ray hit nothing, or select mode
    /// took over.
    pub fn clear_candidate(&mut self) {
        self.candidate = None;
        self.state = PlacementState::Idle;
    }

    /// Commit the current valid candidate as a new brick with a fresh id.
    ///
    /// The candidate is consumed, so a second commit without an intervening
    /// recompute is a no-op. Never partially applies.
    pub fn commit(&mut self, color: Color) -> Option<BrickId> {
        if self.state != PlacementState::PreviewValid {
            return None;
        }
        let preview = self.candidate.take()?;
        self.state = PlacementState::Idle;
        let id = BrickId(self.next_id);
        self.next_id += 1;
        self.bricks.push(Brick {
            id,
            size: preview.size,
            position: preview.position,
            rotation: preview.rotation,
            color,
        });
        Some(id)
    }

    /// Hit-test committed bricks only (the preview is ignored) and set or
    /// clear the selection accordingly.
    pub fn select_at(&mut self, point: Vec3) -> Option<BrickId> {
        let hit = self
            .bricks
            .iter()
            .find(|brick| {
                let half = brick.half_extents();
                (brick.position.x - point.x).abs() < half.x
                    && (brick.position.z - point.z).abs() < half.y
                    && point.y > brick.position.y - EPSILON
                    && point.y < brick.top() + EPSILON
            })
            .map(|brick| brick.id);
        self.selection = hit;
        hit
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Remove a brick by id. Unknown or already-removed ids are a no-op.
    pub fn delete(&mut self, id: BrickId) -> bool {
        let before = self.bricks.len();
        self.bricks.retain(|brick| brick.id != id);
        let removed = self.bricks.len() != before;
        if removed && self.selection == Some(id) {
            self.selection = None;
        }
        removed
    }

    /// Remove the selected brick, if any, clearing the selection.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.delete(id),
            None => false,
        }
    }

    /// Snap a raw point to the placement grid and resolve its stack height.
    ///
    /// Horizontal snap rounds to the nearest half grid unit first, then
    /// re-rounds to the footprint's own pitch so even and odd footprints
    /// both center consistently on the grid. The height is the tallest top
    /// surface among bricks whose effective footprint overlaps ours, or 0.
    pub fn snap_to_grid(&self, point: Vec3, size: BrickSize, rotation: Rotation) -> Vec3 {
        let fp = rotation.footprint(size);
        let half_w = fp.width as f32 * UNIT / 2.0;
        let half_l = fp.length as f32 * UNIT / 2.0;

        let half_unit = UNIT / 2.0;
        let x = (point.x / half_unit).round() * half_unit;
        let z = (point.z / half_unit).round() * half_unit;
        let pitch_x = UNIT * fp.width as f32;
        let pitch_z = UNIT * fp.length as f32;
        let x = (x / pitch_x).round() * pitch_x;
        let z = (z / pitch_z).round() * pitch_z;

        let mut y = 0.0f32;
        for brick in &self.bricks {
            let half = brick.half_extents();
            let overlaps_x = (brick.position.x - x).abs() < half.x + half_w - EPSILON;
            let overlaps_z = (brick.position.z - z).abs() < half.y + half_l - EPSILON;
            if overlaps_x && overlaps_z {
                y = y.max(brick.top());
            }
        }
        Vec3::new(x, y, z)
    }

    /// True when the candidate intersects any committed brick in 3D.
    ///
    /// Overlap holds per axis when the center distance is strictly less
    /// than the sum of the half extents minus the tolerance; all three
    /// axes must overlap for a conflict, which is what lets bricks stack
    /// at differing heights.
    pub fn is_occupied(&self, preview: &PreviewBrick) -> bool {
        let half = preview.half_extents();
        let center_y = preview.position.y + preview.height() / 2.0;
        self.bricks.iter().any(|brick| {
            let bhalf = brick.half_extents();
            let x_overlap =
                (brick.position.x - preview.position.x).abs() < bhalf.x + half.x - EPSILON;
            let z_overlap =
                (brick.position.z - preview.position.z).abs() < bhalf.y + half.y - EPSILON;
            let brick_center_y = brick.position.y + brick.height() / 2.0;
            let y_overlap = (brick_center_y - center_y).abs()
                < (brick.height() + preview.height()) / 2.0 - EPSILON;
            x_overlap && z_overlap && y_overlap
        })
    }

    /// Clustering restriction specific to the 1x2: reject when another
    /// committed 1x2 of the same orientation sits exactly two grid units
    /// away along the long axis with no cross-axis offset. Deliberately
    /// kept narrow; it applies to no other footprint.
    pub fn is_one_by_two_adjacent(&self, preview: &PreviewBrick) -> bool {
        if !is_one_by_two(preview.size) {
            return false;
        }
        let fp = preview.footprint();
        let long_axis_x = fp.width > fp.length;
        let spacing = 2.0 * UNIT;
        self.bricks.iter().any(|brick| {
            if !is_one_by_two(brick.size) {
                return false;
            }
            let bfp = brick.footprint();
            if (bfp.width > bfp.length) != long_axis_x {
                return false;
            }
            let dx = (brick.position.x - preview.position.x).abs();
            let dz = (brick.position.z - preview.position.z).abs();
            if long_axis_x {
                (dx - spacing).abs() < EPSILON && dz < EPSILON
            } else {
                (dz - spacing).abs() < EPSILON && dx < EPSILON
            }
        })
    }

    /// Nearest intersection of a pointer ray with the committed bricks or
    /// with the baseplate plane (within the plate extent). `None` when the
    /// ray misses everything.
    pub fn pick(&self, origin: Vec3, dir: Vec3) -> Option<Vec3> {
        let mut best_t = f32::INFINITY;

        if dir.y.abs() > 1e-6 {
            let t = -origin.y / dir.y;
            if t > 0.0 {
                let hit = origin + dir * t;
                if hit.x.abs() <= BASEPLATE_EXTENT && hit.z.abs() <= BASEPLATE_EXTENT {
                    best_t = t;
                }
            }
        }

        for brick in &self.bricks {
            let half = brick.half_extents();
            let min = Vec3::new(
                brick.position.x - half.x,
                brick.position.y,
                brick.position.z - half.y,
            );
            let max = Vec3::new(brick.position.x + half.x, brick.top(), brick.position.z + half.y);
            if let Some(t) = ray_aabb(origin, dir, min, max) {
                if t < best_t {
                    best_t = t;
                }
            }
        }

        best_t.is_finite().then(|| origin + dir * best_t)
    }
}

fn is_one_by_two(size: BrickSize) -> bool {
    size.width * size.length == 2
}

/// Slab test; returns the entry distance when the ray hits the box.
fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = dir.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_far >= t_near.max(0.0) {
        Some(t_near.max(0.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRICK_HEIGHT, PLATE_HEIGHT};

    fn place(
        engine: &mut PlacementEngine,
        point: Vec3,
        size: BrickSize,
        rotation: Rotation,
    ) -> Option<BrickId> {
        engine.compute_candidate(point, size, rotation)?;
        engine.commit(Color::WHITE)
    }

    /// Every pair of committed bricks must fail the 3D overlap test.
    fn assert_no_overlap(engine: &PlacementEngine) {
        let bricks = engine.bricks();
        for (i, a) in bricks.iter().enumerate() {
            for b in &bricks[i + 1..] {
                let preview = PreviewBrick {
                    size: a.size,
                    position: a.position,
                    rotation: a.rotation,
                };
                let half = preview.half_extents();
                let bhalf = b.half_extents();
                let x = (b.position.x - a.position.x).abs() < bhalf.x + half.x - EPSILON;
                let z = (b.position.z - a.position.z).abs() < bhalf.y + half.y - EPSILON;
                let ya = a.position.y + a.height() / 2.0;
                let yb = b.position.y + b.height() / 2.0;
                let y = (ya - yb).abs() < (a.height() + b.height()) / 2.0 - EPSILON;
                assert!(
                    !(x && z && y),
                    "bricks {:?} and {:?} overlap in 3D",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_snap_rounds_to_footprint_pitch() {
        let engine = PlacementEngine::default();
        // A 2x2 snaps to multiples of 1.6 on both axes.
        let snapped = engine.snap_to_grid(
            Vec3::new(0.3, 0.0, 0.35),
            BrickSize::new(2, 2),
            Rotation::Deg0,
        );
        assert_eq!(snapped, Vec3::ZERO);
        let snapped = engine.snap_to_grid(
            Vec3::new(1.0, 0.0, -1.0),
            BrickSize::new(2, 2),
            Rotation::Deg0,
        );
        assert_eq!(snapped, Vec3::new(1.6, 0.0, -1.6));
    }

    #[test]
    fn test_snap_respects_rotated_footprint() {
        let engine = PlacementEngine::default();
        // 1x4 at 90 degrees: x pitch becomes 4 units, z pitch 1 unit.
        let snapped = engine.snap_to_grid(
            Vec3::new(1.5, 0.0, 1.5),
            BrickSize::new(1, 4),
            Rotation::Deg90,
        );
        assert_eq!(snapped.x, 3.2);
        assert_eq!(snapped.z, 1.6);
    }

    #[test]
    fn test_concrete_scenario_from_design() {
        let mut engine = PlacementEngine::default();
        let two_by_two = BrickSize::new(2, 2);
        let one_by_one = BrickSize::new(1, 1);

        // 2x2 plate at the origin.
        let first = place(&mut engine, Vec3::ZERO, two_by_two, Rotation::Deg0);
        assert!(first.is_some());
        let brick = &engine.bricks()[0];
        assert_eq!(brick.position, Vec3::ZERO);
        assert_eq!(brick.size, two_by_two);

        // 1x1 at the same (x, z) rests on the plate's top surface.
        let second = place(&mut engine, Vec3::ZERO, one_by_one, Rotation::Deg0);
        assert!(second.is_some());
        assert_eq!(engine.bricks()[1].position.y, PLATE_HEIGHT);

        // A second 2x2 fully outside the first footprint sits on the plate floor.
        let third = place(&mut engine, Vec3::new(4.8, 0.0, 0.0), two_by_two, Rotation::Deg0);
        assert!(third.is_some());
        assert_eq!(engine.bricks()[2].position.y, 0.0);

        // A third 2x2 pinned at the first brick's exact position and
        // rotation is occupied; a pointer-driven candidate at that (x, z)
        // would instead snap up on top of the stack.
        let pinned = PreviewBrick {
            size: two_by_two,
            position: Vec3::ZERO,
            rotation: Rotation::Deg0,
        };
        assert!(engine.is_occupied(&pinned));
        let stacked = engine
            .compute_candidate(Vec3::ZERO, two_by_two, Rotation::Deg0)
            .expect("stacking on top of the 1x1 is legal");
        assert_eq!(stacked.position.y, PLATE_HEIGHT + BRICK_HEIGHT);

        assert_no_overlap(&engine);
    }

    #[test]
    fn test_stacking_on_full_brick_height() {
        let mut engine = PlacementEngine::default();
        // 2x4 brick at the origin, then a 1x1 on top of it.
        place(&mut engine, Vec3::ZERO, BrickSize::new(2, 4), Rotation::Deg0).unwrap();
        place(&mut engine, Vec3::ZERO, BrickSize::new(1, 1), Rotation::Deg0).unwrap();
        assert_eq!(engine.bricks()[1].position.y, BRICK_HEIGHT);
        assert_no_overlap(&engine);
    }

    #[test]
    fn test_stacking_resolves_to_tallest_intersecting_top() {
        let mut engine = PlacementEngine::default();
        // A plate and a brick side by side, then a 2x8 spanning both: it
        // must rest on the taller of the two tops.
        place(&mut engine, Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0).unwrap();
        place(&mut engine, Vec3::new(3.2, 0.0, 0.0), BrickSize::new(2, 3), Rotation::Deg90).unwrap();
        let spanning = place(&mut engine, Vec3::new(1.6, 0.0, 0.0), BrickSize::new(2, 8), Rotation::Deg90);
        assert!(spanning.is_some());
        assert_eq!(engine.bricks()[2].position.y, BRICK_HEIGHT);
        assert_no_overlap(&engine);
    }

    #[test]
    fn test_commit_is_idempotent_without_recompute() {
        let mut engine = PlacementEngine::default();
        assert!(engine
            .compute_candidate(Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0)
            .is_some());
        assert!(engine.commit(Color::WHITE).is_some());
        // Second commit without a recompute: state is no longer PreviewValid.
        assert!(engine.commit(Color::WHITE).is_none());
        assert_eq!(engine.bricks().len(), 1);
    }

    #[test]
    fn test_commit_without_candidate_is_noop() {
        let mut engine = PlacementEngine::default();
        assert!(engine.commit(Color::WHITE).is_none());
        assert!(engine.bricks().is_empty());
        assert_eq!(engine.state(), PlacementState::Idle);
    }

    #[test]
    fn test_edge_adjacent_bricks_do_not_collide() {
        let mut engine = PlacementEngine::default();
        place(&mut engine, Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0).unwrap();
        // Exactly touching along x: centers 1.6 apart, sum of half extents 1.6.
        let next = place(&mut engine, Vec3::new(1.6, 0.0, 0.0), BrickSize::new(2, 2), Rotation::Deg0);
        assert!(next.is_some());
        assert_eq!(engine.bricks()[1].position.y, 0.0);
        assert_no_overlap(&engine);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut engine = PlacementEngine::default();
        let a = place(&mut engine, Vec3::ZERO, BrickSize::new(1, 1), Rotation::Deg0).unwrap();
        let b = place(&mut engine, Vec3::new(1.6, 0.0, 0.0), BrickSize::new(1, 1), Rotation::Deg0)
            .unwrap();
        engine.delete(a);
        let c = place(&mut engine, Vec3::ZERO, BrickSize::new(1, 1), Rotation::Deg0).unwrap();
        assert_ne!(b, c);
        assert!(c > b);
    }

    #[test]
    fn test_select_and_delete_exactly_one() {
        let mut engine = PlacementEngine::default();
        place(&mut engine, Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0).unwrap();
        let id = place(&mut engine, Vec3::new(4.8, 0.0, 0.0), BrickSize::new(2, 2), Rotation::Deg0)
            .unwrap();

        // Click inside the second brick's footprint.
        assert_eq!(engine.select_at(Vec3::new(4.9, 0.1, 0.1)), Some(id));
        assert_eq!(engine.selection(), Some(id));

        assert!(engine.delete_selected());
        assert_eq!(engine.bricks().len(), 1);
        assert_eq!(engine.selection(), None);

        // Deleting again with no selection is a no-op.
        assert!(!engine.delete_selected());
        assert_eq!(engine.bricks().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut engine = PlacementEngine::default();
        place(&mut engine, Vec3::ZERO, BrickSize::new(1, 1), Rotation::Deg0).unwrap();
        assert!(!engine.delete(BrickId(999)));
        assert_eq!(engine.bricks().len(), 1);
    }

    #[test]
    fn test_select_miss_clears_selection() {
        let mut engine = PlacementEngine::default();
        let id = place(&mut engine, Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0).unwrap();
        assert_eq!(engine.select_at(Vec3::new(0.1, 0.1, 0.1)), Some(id));
        assert_eq!(engine.select_at(Vec3::new(8.0, 0.0, 8.0)), None);
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_one_by_two_adjacency_rejection() {
        let mut engine = PlacementEngine::default();
        let one_by_two = BrickSize::new(1, 2);
        // Long axis along z at rotation 0.
        place(&mut engine, Vec3::ZERO, one_by_two, Rotation::Deg0).unwrap();

        // Same orientation, exactly two grid units along z: rejected.
        let preview = PreviewBrick {
            size: one_by_two,
            position: Vec3::new(0.0, 0.0, 2.0 * UNIT),
            rotation: Rotation::Deg0,
        };
        assert!(engine.is_one_by_two_adjacent(&preview));

        // Cross-axis offset disarms the rule.
        let preview = PreviewBrick {
            size: one_by_two,
            position: Vec3::new(UNIT, 0.0, 2.0 * UNIT),
            rotation: Rotation::Deg0,
        };
        assert!(!engine.is_one_by_two_adjacent(&preview));

        // Perpendicular orientation disarms the rule.
        let preview = PreviewBrick {
            size: one_by_two,
            position: Vec3::new(0.0, 0.0, 2.0 * UNIT),
            rotation: Rotation::Deg90,
        };
        assert!(!engine.is_one_by_two_adjacent(&preview));

        // Other footprints never trigger it.
        let preview = PreviewBrick {
            size: BrickSize::new(2, 2),
            position: Vec3::new(0.0, 0.0, 2.0 * UNIT),
            rotation: Rotation::Deg0,
        };
        assert!(!engine.is_one_by_two_adjacent(&preview));
    }

    #[test]
    fn test_pick_hits_baseplate_and_brick_tops() {
        let mut engine = PlacementEngine::default();

        // Straight down over empty plate.
        let hit = engine
            .pick(Vec3::new(1.0, 10.0, 1.0), Vec3::NEG_Y)
            .expect("plate hit");
        assert_eq!(hit.y, 0.0);

        // Straight down over a brick lands on its top surface.
        place(&mut engine, Vec3::ZERO, BrickSize::new(2, 4), Rotation::Deg0).unwrap();
        let hit = engine
            .pick(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y)
            .expect("brick hit");
        assert!((hit.y - BRICK_HEIGHT).abs() < 1e-5);

        // Outside the baseplate extent, with no brick in the way: miss.
        assert!(engine.pick(Vec3::new(100.0, 10.0, 0.0), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_clear_candidate_goes_idle() {
        let mut engine = PlacementEngine::default();
        engine.compute_candidate(Vec3::ZERO, BrickSize::new(2, 2), Rotation::Deg0);
        assert_eq!(engine.state(), PlacementState::PreviewValid);
        engine.clear_candidate();
        assert_eq!(engine.state(), PlacementState::Idle);
        assert!(engine.candidate().is_none());
        assert!(engine.commit(Color::WHITE).is_none());
    }
}
