//! Imgui control panel for strategies, parameters and playback.

use imgui::Ui;
use log::warn;

use crate::gfx::depth_effect::DepthEffect;
use crate::gfx::palette::Palette;
use crate::gfx::projection::Projector;
use crate::simulation::manager::SimulationManager;
use crate::simulation::settings::Parameter;

/// Renders the trail control window
///
/// Strategy radio buttons apply immediately. Parameter fields apply on
/// Enter and rebuild the simulation.
pub fn render_trail_controls(ui: &Ui, manager: &mut SimulationManager) {
    ui.window("Line Trails")
        .size([300.0, 520.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("FPS: {}", manager.fps_text()));
            let stats = manager.last_stats();
            ui.text(format!(
                "Segments: {} drawn, {} skipped",
                stats.segments_drawn, stats.segments_skipped
            ));
            ui.text(format!("Respawns: {}", manager.simulation().respawn_count()));
            ui.separator();

            render_strategy_controls(ui, manager);
            ui.separator();
            render_parameter_controls(ui, manager);
            ui.separator();
            render_action_buttons(ui, manager);
        });
}

fn render_strategy_controls(ui: &Ui, manager: &mut SimulationManager) {
    if ui.collapsing_header("Projection", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        let mut projector = manager.strategies().projector;
        for option in Projector::ALL {
            if ui.radio_button(
                format!("{}##{}", option, Projector::CATEGORY),
                &mut projector,
                option,
            ) {
                manager.select_projector(projector);
            }
        }
    }

    if ui.collapsing_header("Depth Effect", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        let mut depth_effect = manager.strategies().depth_effect;
        for (i, option) in DepthEffect::ALL.into_iter().enumerate() {
            if i > 0 {
                ui.same_line();
            }
            if ui.radio_button(
                format!("{}##{}", option, DepthEffect::CATEGORY),
                &mut depth_effect,
                option,
            ) {
                manager.select_depth_effect(depth_effect);
            }
        }
    }

    if ui.collapsing_header("Palette", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        let mut palette = manager.strategies().palette;
        for (i, option) in Palette::ALL.into_iter().enumerate() {
            if i > 0 {
                ui.same_line();
            }
            if ui.radio_button(
                format!("{}##{}", option, Palette::CATEGORY),
                &mut palette,
                option,
            ) {
                manager.select_palette(palette);
            }
        }
    }
}

fn render_parameter_controls(ui: &Ui, manager: &mut SimulationManager) {
    if !ui.collapsing_header("Parameters", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }

    ui.columns(2, "parameter_columns", false);
    for parameter in Parameter::ALL {
        ui.text(parameter.name());
        ui.next_column();

        ui.set_next_item_width(-1.0);
        let mut text = manager.parameter(parameter).to_string();
        if ui
            .input_text(format!("##{}", parameter), &mut text)
            .enter_returns_true(true)
            .build()
        {
            match text.trim().parse::<f64>() {
                Ok(value) => {
                    if let Err(e) = manager.set_parameter(parameter, value) {
                        warn!("{}", e);
                    }
                }
                Err(_) => warn!("{}: '{}' is not a number", parameter, text),
            }
        }
        ui.next_column();
    }
    ui.columns(1, "", false);
}

fn render_action_buttons(ui: &Ui, manager: &mut SimulationManager) {
    let label = if manager.is_paused() { "Play" } else { "Pause" };
    if ui.button(label) {
        manager.set_paused(!manager.is_paused());
    }
    ui.same_line();
    if ui.button("Reset") {
        manager.reinitialize();
    }
}
