use bevy::prelude::*;

use engine::config::UNIT;
use engine::placement::{PlacementEngine, PlacementState};

/// Marker for the translucent ghost brick shown at the candidate position.
#[derive(Component)]
pub struct GhostBrick;

pub fn spawn_ghost(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Unit cube, scaled per candidate footprint every frame.
    let mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.5),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.spawn((
        GhostBrick,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        Visibility::Hidden,
    ));
}

/// Track the engine's candidate: visible only while the preview is valid.
/// Invalid and idle states are suppressed entirely.
pub fn update_ghost(
    engine: Res<PlacementEngine>,
    mut query: Query<(&mut Transform, &mut Visibility), With<GhostBrick>>,
) {
    let Ok((mut transform, mut vis)) = query.get_single_mut() else {
        return;
    };

    let candidate = match (engine.state(), engine.candidate()) {
        (PlacementState::PreviewValid, Some(candidate)) => candidate,
        _ => {
            *vis = Visibility::Hidden;
            return;
        }
    };

    let fp = candidate.footprint();
    let height = candidate.height();
    transform.translation = candidate.position + Vec3::Y * (height / 2.0);
    transform.scale = Vec3::new(fp.width as f32 * UNIT, height, fp.length as f32 * UNIT);
    *vis = Visibility::Visible;
}
