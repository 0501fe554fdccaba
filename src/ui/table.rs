use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{AggregatedRow, format_births};
use crate::data::schema::LogicalField;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Aggregated rows table
// ---------------------------------------------------------------------------

/// Plain table of the aggregated rows with a 0-based row index.
pub fn aggregated_table(ui: &mut Ui, rows: &[AggregatedRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("");
            });
            for field in [
                LogicalField::StateOfResidence,
                LogicalField::SexOfInfant,
                LogicalField::Births,
            ] {
                header.col(|ui| {
                    ui.strong(field.key());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let idx = row.index();
                let r = &rows[idx];
                row.col(|ui| {
                    ui.label(idx.to_string());
                });
                row.col(|ui| {
                    ui.label(r.state.to_string());
                });
                row.col(|ui| {
                    ui.label(r.sex.to_string());
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format_births(r.births));
                    });
                });
            });
        });
}
