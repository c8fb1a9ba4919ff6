use bevy::prelude::*;

pub mod baseplate;
pub mod brick_render;
pub mod camera;
pub mod input;
pub mod preview;

use camera::{CameraOrbitDrag, LeftClickDrag};
use input::{BuildTool, CursorPoint};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LeftClickDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<BuildTool>()
            .init_resource::<CursorPoint>()
            .init_resource::<brick_render::BrickMeshIndex>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    baseplate::spawn_baseplate,
                    preview::spawn_ghost,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                ),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_point,
                    input::update_candidate.after(input::update_cursor_point),
                    input::handle_keyboard,
                    // Click handling reads the drag flag before the camera
                    // system resets it on release.
                    input::handle_click
                        .after(input::update_candidate)
                        .before(camera::camera_left_drag),
                    camera::camera_left_drag,
                    preview::update_ghost.after(input::handle_click),
                    brick_render::sync_brick_meshes.after(input::handle_click),
                    brick_render::update_selection_highlight
                        .after(brick_render::sync_brick_meshes),
                    baseplate::draw_grid,
                ),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(1.0, 1.0, 1.0),
        brightness: 250.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.5, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Cool fill light from the opposite side so black bricks stay readable
    commands.spawn((
        PointLight {
            intensity: 500_000.0,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-10.0, 6.0, -12.0),
    ));
}
