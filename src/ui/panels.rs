use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use iris_explorer::Species;
use iris_explorer::data::loader;

use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – chart selector and species filter
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Charts");
            ui.separator();
            for chart in ChartKind::ALL {
                ui.selectable_value(&mut state.chart, chart, chart.title());
            }

            ui.add_space(8.0);
            ui.heading("Species");
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            let counts = state.dataset.class_counts();
            for species in Species::ALL {
                let n = counts[species.code() as usize].1;
                let text = RichText::new(format!("{species}  ({n})"))
                    .color(state.color_map.color_for(species));

                let mut checked = state.filters.contains(&species);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_species(species);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload bundled dataset").clicked() {
                reload_bundled(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} records loaded, {} visible",
            state.source,
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                state.set_dataset(dataset, path.display().to_string());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn reload_bundled(state: &mut AppState) {
    match loader::load_bundled() {
        Ok(dataset) => state.set_dataset(dataset, "bundled"),
        Err(e) => {
            log::error!("Failed to reload bundled dataset: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
