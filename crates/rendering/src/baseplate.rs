use bevy::prelude::*;

use engine::config::{BASEPLATE_SIZE, UNIT};

const PLATE_THICKNESS: f32 = 0.2;

/// Spawn the baseplate slab. Its top surface sits exactly at y = 0, where
/// ground-level bricks rest.
pub fn spawn_baseplate(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = BASEPLATE_SIZE as f32 * UNIT;
    let mesh = meshes.add(Cuboid::new(side, PLATE_THICKNESS, side));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.78, 0.55),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, -PLATE_THICKNESS / 2.0, 0.0),
    ));
}

/// Faint gizmo grid over the baseplate, one cell per grid unit.
pub fn draw_grid(mut gizmos: Gizmos) {
    gizmos.grid(
        Isometry3d::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        UVec2::splat(BASEPLATE_SIZE),
        Vec2::splat(UNIT),
        Color::srgba(0.0, 0.2, 0.0, 0.25),
    );
}
