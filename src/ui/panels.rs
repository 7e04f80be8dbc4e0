use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::model::month_name;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the distinct values so we can mutate state inside the loops.
    let months = dataset.months.clone();
    let bases = dataset.bases.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            ui.separator();

            // ---- Month filter ----
            let n_selected = state.selection.months.len();
            let header = format!("Months  ({n_selected}/{})", months.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("months")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for &month in &months {
                        let mut checked = state.selection.months.contains(&month);
                        if ui.checkbox(&mut checked, month_name(month)).changed() {
                            state.toggle_month(month);
                        }
                    }
                });

            // ---- Base filter ----
            let n_selected = state.selection.bases.len();
            let header = format!("Bases  ({n_selected}/{})", bases.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("bases")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for base in &bases {
                        let mut checked = state.selection.bases.contains(base);
                        let label = RichText::new(base)
                            .color(state.base_colors.color_for(base));
                        if ui.checkbox(&mut checked, label).changed() {
                            state.toggle_base(base);
                        }
                    }
                });

            ui.separator();

            // ---- Base-performance selector ----
            ui.strong("Base for analysis");
            let current = state.selected_base.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("analysis_base")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for base in &bases {
                        if ui.selectable_label(current == *base, base).clicked() {
                            state.set_selected_base(base.clone());
                        }
                    }
                });
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state
                .view
                .as_ref()
                .map(|v| v.scatter.points.len())
                .unwrap_or(0);
            ui.label(format!("{} records loaded, {} visible", ds.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a CSV into the state; errors end up in the status bar, never a panic.
pub fn load_path(state: &mut AppState, path: &Path) {
    match loader::load_csv(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} records, bases {:?}",
                dataset.len(),
                dataset.bases
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trip data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        load_path(state, &path);
    }
}
