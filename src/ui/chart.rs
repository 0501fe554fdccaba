use std::collections::BTreeSet;

use eframe::egui::{self, Color32, FontId, Pos2, RichText, Sense, Ui, epaint::TextShape};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint};

use crate::color::ColorMap;
use crate::data::aggregate::{AggregatedRow, format_births};
use crate::data::model::FieldValue;

const BAR_WIDTH: f64 = 0.7;
const LABEL_ANGLE: f32 = -std::f32::consts::FRAC_PI_4;
const LABEL_FONT_SIZE: f32 = 12.0;

// ---------------------------------------------------------------------------
// Chart model: aggregated rows → stacked series
// ---------------------------------------------------------------------------

/// Bars for one sex category, one value per state (0 where the pair is absent).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sex: FieldValue,
    pub values: Vec<f64>,
}

/// Stacked bar layout: x categories are states, stack layers are sexes.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBars {
    pub states: Vec<FieldValue>,
    pub series: Vec<Series>,
}

impl StackedBars {
    pub fn from_rows(rows: &[AggregatedRow]) -> Self {
        // Rows arrive ordered by state, so dedup keeps first-seen state order.
        let mut states: Vec<FieldValue> = rows.iter().map(|r| r.state.clone()).collect();
        states.dedup();
        let sexes: BTreeSet<&FieldValue> = rows.iter().map(|r| &r.sex).collect();

        let series = sexes
            .into_iter()
            .map(|sex| {
                let mut values = vec![0.0; states.len()];
                for r in rows.iter().filter(|r| &r.sex == sex) {
                    if let Some(x) = states.iter().position(|s| s == &r.state) {
                        values[x] += r.births;
                    }
                }
                Series {
                    sex: sex.clone(),
                    values,
                }
            })
            .collect();

        StackedBars { states, series }
    }

    /// Height of the full stack above each state.
    pub fn totals(&self) -> Vec<f64> {
        (0..self.states.len())
            .map(|x| self.series.iter().map(|s| s.values[x]).sum())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Births chart (central panel)
// ---------------------------------------------------------------------------

/// Render the stacked births chart with rotated state labels underneath.
pub fn births_chart(ui: &mut Ui, title: &str, rows: &[AggregatedRow], colors: Option<&ColorMap>) {
    let model = StackedBars::from_rows(rows);

    ui.heading(title);
    legend_strip(ui, colors);

    let color_of = |sex: &FieldValue| {
        colors
            .map(|cm| cm.color_for(sex))
            .unwrap_or(Color32::LIGHT_BLUE)
    };

    let label_galleys: Vec<_> = model
        .states
        .iter()
        .map(|s| {
            ui.painter().layout_no_wrap(
                s.to_string(),
                FontId::proportional(LABEL_FONT_SIZE),
                ui.visuals().text_color(),
            )
        })
        .collect();
    let widest = label_galleys
        .iter()
        .map(|g| g.size().x)
        .fold(0.0_f32, f32::max);
    let label_band = widest * LABEL_ANGLE.cos().abs() + LABEL_FONT_SIZE * 3.0;

    let plot_height = (ui.available_height() * 0.6 - label_band).max(160.0);

    let response = ui
        .scope(|ui: &mut Ui| {
            ui.visuals_mut().extreme_bg_color = Color32::WHITE;

            Plot::new("births_chart")
                .height(plot_height)
                .legend(Legend::default())
                .y_axis_label("Total Births")
                .x_axis_formatter(|_, _| String::new())
                .include_y(0.0)
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    let mut stacked: Vec<BarChart> = Vec::new();
                    for series in &model.series {
                        let bars: Vec<Bar> = series
                            .values
                            .iter()
                            .enumerate()
                            .map(|(x, &v)| {
                                Bar::new(x as f64, v)
                                    .width(BAR_WIDTH)
                                    .name(format!("{}, {}", model.states[x], series.sex))
                            })
                            .collect();

                        let below: Vec<&BarChart> = stacked.iter().collect();
                        let chart = BarChart::new(bars)
                            .name(series.sex.to_string())
                            .color(color_of(&series.sex))
                            .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                                format!("{}\n{}", bar.name, format_births(bar.value))
                            }))
                            .stack_on(&below);
                        stacked.push(chart);
                    }
                    for chart in stacked {
                        plot_ui.bar_chart(chart);
                    }
                })
        })
        .inner;

    // ---- Rotated x tick labels and axis title ----
    let (band, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), label_band),
        Sense::hover(),
    );
    let painter = ui.painter_at(band);
    let frame = response.response.rect;
    for (x, galley) in label_galleys.into_iter().enumerate() {
        let tick = response
            .transform
            .position_from_point(&PlotPoint::new(x as f64, 0.0));
        if tick.x < frame.left() || tick.x > frame.right() {
            continue;
        }
        // Text rises from the lower left and ends at the tick.
        let w = galley.size().x;
        let start = Pos2::new(
            tick.x - w * LABEL_ANGLE.cos(),
            band.top() + 4.0 - w * LABEL_ANGLE.sin(),
        );
        let color = ui.visuals().text_color();
        painter.add(TextShape::new(start, galley, color).with_angle(LABEL_ANGLE));
    }
    painter.text(
        Pos2::new(frame.center().x, band.bottom() - 2.0),
        egui::Align2::CENTER_BOTTOM,
        "State of Residence",
        FontId::proportional(14.0),
        ui.visuals().strong_text_color(),
    );
}

/// Titled legend row: "Gender" followed by one swatch per category.
fn legend_strip(ui: &mut Ui, colors: Option<&ColorMap>) {
    let Some(cm) = colors else {
        return;
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Gender");
        for (label, color) in cm.legend_entries() {
            ui.label(RichText::new("■").color(color));
            ui.label(label);
        }
    });
}
