//! Pointer and keyboard input, translated into placement engine calls.
//!
//! All tool state lives here, on the presentation side; the engine only
//! sees `compute_candidate` / `commit` / `select_at` / `delete` calls.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use engine::brick::Rotation;
use engine::catalog::{BrickSize, BRICK_CATALOG, CLASSIC_COLORS, DEFAULT_CATALOG_INDEX};
use engine::placement::PlacementEngine;
use engine::rng::BuildRng;
use engine::scatter;

use crate::camera::LeftClickDrag;

/// Current tool state: active catalog entry, rotation, color choice, and
/// whether select mode is engaged.
#[derive(Resource)]
pub struct BuildTool {
    /// Index into `BRICK_CATALOG`.
    pub size_index: usize,
    pub rotation: Rotation,
    /// Index into `CLASSIC_COLORS`; ignored in random-color mode.
    pub color_index: usize,
    pub random_color: bool,
    pub select_mode: bool,
}

impl Default for BuildTool {
    fn default() -> Self {
        Self {
            size_index: DEFAULT_CATALOG_INDEX,
            rotation: Rotation::default(),
            color_index: 0,
            random_color: true,
            select_mode: false,
        }
    }
}

impl BuildTool {
    pub fn size(&self) -> BrickSize {
        BRICK_CATALOG[self.size_index]
    }

    /// Digit keys: select the size and leave select mode.
    pub fn set_size(&mut self, index: usize) {
        self.size_index = index;
        self.select_mode = false;
    }

    /// Toolbar click: re-picking the already-active size toggles select
    /// mode instead of being a no-op.
    pub fn toggle_or_set_size(&mut self, index: usize) {
        if self.size_index == index && !self.select_mode {
            self.select_mode = true;
        } else {
            self.size_index = index;
            self.select_mode = false;
        }
    }

    /// The color a commit would use right now.
    pub fn commit_color(&self, rng: &mut BuildRng) -> Color {
        if self.random_color {
            scatter::random_any_color(&mut rng.0)
        } else {
            CLASSIC_COLORS[self.color_index].1.into()
        }
    }
}

/// Latest pointer ray hit against the scene (bricks or baseplate).
#[derive(Resource, Default)]
pub struct CursorPoint {
    pub point: Vec3,
    pub valid: bool,
}

/// Ray-pick the scene under the cursor every frame.
pub fn update_cursor_point(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    engine: Res<PlacementEngine>,
    mut cursor: ResMut<CursorPoint>,
) {
    cursor.valid = false;
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };
    if let Some(hit) = engine.pick(ray.origin, *ray.direction) {
        cursor.point = hit;
        cursor.valid = true;
    }
}

/// Recompute the placement candidate from the current cursor hit.
pub fn update_candidate(
    cursor: Res<CursorPoint>,
    tool: Res<BuildTool>,
    mut engine: ResMut<PlacementEngine>,
) {
    if tool.select_mode || !cursor.valid {
        engine.clear_candidate();
        return;
    }
    engine.compute_candidate(cursor.point, tool.size(), tool.rotation);
}

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Digit keys pick a brick size, R rotates, Delete/Backspace removes the
/// selected brick.
pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut tool: ResMut<BuildTool>,
    mut engine: ResMut<PlacementEngine>,
) {
    for (index, key) in DIGIT_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            tool.set_size(index);
            // Entering placement mode drops any selection.
            engine.clear_selection();
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        tool.rotation = tool.rotation.step();
    }

    if keys.just_pressed(KeyCode::Delete) || keys.just_pressed(KeyCode::Backspace) {
        if engine.delete_selected() {
            info!("deleted selected brick");
        }
    }
}

/// Left click: commit the candidate (place mode), clear a stale selection,
/// or hit-test for selection (select mode). Runs before the camera's
/// left-drag system so the drag flag still reflects the finished gesture.
pub fn handle_click(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPoint>,
    tool: Res<BuildTool>,
    left_drag: Res<LeftClickDrag>,
    mut engine: ResMut<PlacementEngine>,
    mut rng: ResMut<BuildRng>,
    mut contexts: EguiContexts,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    // Drags pan the camera; clicks over the toolbar belong to egui.
    if left_drag.is_dragging || egui_wants_pointer(&mut contexts) {
        return;
    }

    if tool.select_mode {
        if cursor.valid {
            engine.select_at(cursor.point);
        } else {
            engine.clear_selection();
        }
        return;
    }

    if engine.selection().is_some() {
        engine.clear_selection();
        return;
    }

    let color = tool.commit_color(&mut rng);
    if let Some(id) = engine.commit(color) {
        info!("placed brick {:?}", id);
    }
}

/// Returns `true` when egui wants the pointer — the cursor is over a panel
/// or egui is handling a drag. World input should early-return then.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
