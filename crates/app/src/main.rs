use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Brickyard".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // Reproducible starter scene: BRICKYARD_SEED=7 brickyard
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(seed) = std::env::var("BRICKYARD_SEED")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
    {
        app.insert_resource(engine::rng::BuildRng::from_seed_u64(seed));
    }

    app.add_plugins((
        engine::EnginePlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}
