use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use railway_dashboard::data::filter::FILTER_COLUMNS;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🚆 UK Railway Dashboard");
    ui.add_space(4.0);

    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let options = state.pipeline.options().clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Per-column multiselects (collapsible) ----
            for column in FILTER_COLUMNS {
                let values = options.values(column);
                if values.is_empty() {
                    continue;
                }

                let n_selected = state.criteria.selection(column).map_or(0, |s| s.len());
                let header_text = if n_selected == 0 {
                    format!("{column}  (all)")
                } else {
                    format!("{column}  ({n_selected}/{})", values.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(column.header())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("Clear").clicked() {
                            state.clear_filter(column);
                        }

                        for value in values {
                            let mut checked = state.criteria.is_selected(column, value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle_filter_value(column, value);
                            }
                        }
                    });
            }

            if !state.criteria.is_empty() && ui.button("Clear all filters").clicked() {
                state.clear_all_filters();
            }

            ui.add_space(8.0);
            ui.heading("Map Options");
            ui.separator();
            ui.checkbox(&mut state.show_points, "Show Points");
            ui.checkbox(&mut state.show_routes, "Show Routes");
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered records…").clicked() {
                export_records_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export summary…").clicked() {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.pipeline.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn export_records_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .add_filter("CSV", &["csv"])
        .set_file_name("railway_filtered.csv")
        .save_file();

    if let Some(path) = file {
        state.export_records(&path);
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .add_filter("JSON", &["json"])
        .set_file_name("railway_summary.json")
        .save_file();

    if let Some(path) = file {
        state.export_summary(&path);
    }
}
