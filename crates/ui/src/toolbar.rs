//! Bottom toolbar: brick sizes, color swatches, rotate/select/delete.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use engine::catalog::{BRICK_CATALOG, CLASSIC_COLORS};
use engine::placement::PlacementEngine;

use rendering::input::BuildTool;

fn swatch_color(srgba: bevy::color::Srgba) -> egui::Color32 {
    egui::Color32::from_rgb(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
    )
}

pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut tool: ResMut<BuildTool>,
    mut engine: ResMut<PlacementEngine>,
) {
    egui::TopBottomPanel::bottom("toolbar").show(contexts.ctx_mut(), |ui| {
        ui.horizontal_wrapped(|ui| {
            // Brick sizes; clicking the active one switches to select mode.
            for (index, size) in BRICK_CATALOG.iter().enumerate() {
                let active = index == tool.size_index && !tool.select_mode;
                let label = format!("{} [{}]", size.label(), index + 1);
                if ui.selectable_label(active, label).clicked() {
                    tool.toggle_or_set_size(index);
                    if !tool.select_mode {
                        engine.clear_selection();
                    }
                }
            }

            ui.separator();

            if ui
                .button(format!("Rotate {}\u{b0} [R]", tool.rotation.degrees() as i32))
                .clicked()
            {
                tool.rotation = tool.rotation.step();
            }

            let mut select = tool.select_mode;
            if ui.toggle_value(&mut select, "Select").changed() {
                tool.select_mode = select;
                if !select {
                    engine.clear_selection();
                }
            }

            ui.separator();

            ui.toggle_value(&mut tool.random_color, "Random color");
            if !tool.random_color {
                for (index, (name, srgba)) in CLASSIC_COLORS.iter().enumerate() {
                    let marker = if index == tool.color_index { "•" } else { " " };
                    let button = egui::Button::new(marker).fill(swatch_color(*srgba));
                    if ui.add(button).on_hover_text(*name).clicked() {
                        tool.color_index = index;
                    }
                }
            }

            ui.separator();

            let has_selection = engine.selection().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete [Del]"))
                .clicked()
            {
                engine.delete_selected();
            }

            ui.separator();
            ui.label(format!("{} bricks", engine.bricks().len()));
        });
    });
}
