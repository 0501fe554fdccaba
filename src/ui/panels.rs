use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::model::Dimension;
use crate::error::LoadError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – page title
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, config: &DashboardConfig) {
    ui.add_space(6.0);
    ui.heading(RichText::new(&config.title).size(26.0).strong());
    ui.label(RichText::new(&config.subtitle).size(17.0));
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the three multi-select filters. Every checkbox change goes through
/// `AppState`, which recomputes the aggregate once per change.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Ok(dataset) = &state.dataset else {
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let options: Vec<(Dimension, Vec<_>)> = Dimension::ALL
        .iter()
        .map(|&d| (d, dataset.distinct(d).iter().cloned().collect()))
        .collect();
    let n_records = dataset.len();
    let dropped = dataset.dropped_rows;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (dimension, values) in &options {
                let filter = state.selection.get(*dimension);
                let summary = if filter.includes_all() {
                    "All".to_string()
                } else {
                    format!("{}/{}", filter.selected().len(), values.len())
                };
                let header_text = format!("{}  ({summary})", dimension.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dimension)
                    .default_open(*dimension != Dimension::State)
                    .show(ui, |ui: &mut Ui| {
                        let mut all = state.selection.get(*dimension).includes_all();
                        if ui.checkbox(&mut all, RichText::new("All").italics()).changed() {
                            state.set_all(*dimension, all);
                        }

                        for val in values {
                            let mut checked = state.selection.get(*dimension).is_selected(val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.set_value(*dimension, val, checked);
                            }
                        }
                    });
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.add_space(8.0);
            ui.label(format!("{n_records} records loaded"));
            if dropped > 0 {
                ui.label(
                    RichText::new(format!("{dropped} row(s) dropped: births not numeric"))
                        .color(Color32::from_rgb(200, 140, 0)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Messages shown in place of the chart and table
// ---------------------------------------------------------------------------

/// Fatal load error. Schema failures also list every available column.
pub fn load_error(ui: &mut Ui, err: &LoadError) {
    ui.label(RichText::new(err.to_string()).color(Color32::RED).strong());

    if let LoadError::Schema(unresolved) = err {
        ui.add_space(8.0);
        ui.label("Available columns:");
        ScrollArea::vertical().show(ui, |ui: &mut Ui| {
            for (i, col) in unresolved.available.iter().enumerate() {
                ui.monospace(format!("{i:>3}  {col}"));
            }
        });
    }
}

/// Recoverable warning for an empty filter result.
pub fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::from_rgb(220, 160, 0)).strong());
}
