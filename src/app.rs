use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub config: DashboardConfig,
    pub state: AppState,
}

impl DashboardApp {
    /// Load the dataset once; it stays immutable for the rest of the session.
    pub fn new(config: DashboardConfig) -> Self {
        let state = AppState::load(&config.data_path);
        Self { config, state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header(ui, &self.config);
        });

        // ---- Left side panel: filters (only once a dataset is loaded) ----
        if self.state.dataset.is_ok() {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: chart + table, or the message replacing them ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Err(e) = &self.state.dataset {
                panels::load_error(ui, e);
                return;
            }
            match &self.state.outcome {
                Err(e) => panels::no_data(ui, &e.to_string()),
                Ok(rows) => {
                    chart::births_chart(
                        ui,
                        &self.config.chart_title,
                        rows,
                        self.state.color_map.as_ref(),
                    );
                    ui.separator();
                    table::aggregated_table(ui, rows);
                }
            }
        });
    }
}
