//! Placement engine for the brick building toy.
//!
//! Owns the committed brick set, grid snapping, occupancy validation, and
//! the commit/select/delete lifecycle. The rendering and ui crates are
//! presentation glue that call into [`placement::PlacementEngine`] and draw
//! its output; the engine itself never reads input devices.

use bevy::prelude::*;

pub mod brick;
pub mod catalog;
pub mod config;
pub mod placement;
pub mod rng;
pub mod scatter;

pub struct EnginePlugin;

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<placement::PlacementEngine>()
            .init_resource::<rng::BuildRng>()
            .add_systems(Startup, scatter::scatter_initial_bricks);
    }
}
