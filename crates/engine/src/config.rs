/// World units per grid unit. Integer grid coordinates scale by this to
/// world coordinates.
pub const UNIT: f32 = 0.8;

/// Vertical extent of a plate. Only the 2x2 footprint uses this.
pub const PLATE_HEIGHT: f32 = 0.32;
/// Vertical extent of a regular brick (every footprint except the 2x2).
pub const BRICK_HEIGHT: f32 = 0.96;

// Stud geometry, consumed by the rendering crate.
pub const STUD_HEIGHT: f32 = 0.18;
pub const STUD_RADIUS: f32 = 0.24;
pub const STUD_SPACING: f32 = 0.8;

/// Baseplate side length in grid units.
pub const BASEPLATE_SIZE: u32 = 32;
/// Half extent of the baseplate in world units.
pub const BASEPLATE_EXTENT: f32 = BASEPLATE_SIZE as f32 * UNIT / 2.0;

/// Tolerance for the overlap tests so edge-adjacent bricks don't register
/// as colliding.
pub const EPSILON: f32 = 1e-4;
