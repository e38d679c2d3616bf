//! Chart Plotter Module
//! Draws the interactive pie chart and data table using egui_plot.

use crate::charts::palette_color;
use crate::charts::pie::PieSlice;
use crate::data::{SelectedTable, COUNTRY_COLUMN, IMPRESSIONS_COLUMN};
use crate::stats::group_thousands;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Legend, Plot, PlotPoint, Polygon, Text};

const ARC_SEGMENTS: usize = 120;
/// Slices narrower than this get no percentage label.
const MIN_LABEL_FRACTION: f64 = 0.04;

/// Creates dashboard visualizations with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn slice_color(index: usize) -> Color32 {
        let (r, g, b) = palette_color(index);
        Color32::from_rgb(r, g, b)
    }

    /// Pie with one polygon per country; the legend toggles slices.
    pub fn draw_pie_chart(ui: &mut egui::Ui, slices: &[PieSlice], height: f32) {
        Plot::new("impressions_pie")
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .legend(Legend::default())
            .include_x(-1.2)
            .include_x(1.2)
            .include_y(-1.2)
            .include_y(1.2)
            .show(ui, |plot_ui| {
                for (idx, slice) in slices.iter().enumerate() {
                    let color = Self::slice_color(idx);
                    plot_ui.polygon(
                        Polygon::new(slice.outline(ARC_SEGMENTS))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(format!(
                                "{} ({})",
                                slice.country,
                                group_thousands(u128::from(slice.impressions))
                            )),
                    );

                    if slice.fraction >= MIN_LABEL_FRACTION {
                        let [x, y] = slice.label_anchor(0.65);
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                                .color(Color32::WHITE)
                                .strong(),
                        ));
                    }
                }
            });
    }

    /// Striped two-column table of the selection.
    pub fn draw_data_table(ui: &mut egui::Ui, selected: &SelectedTable) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("impressions_table")
                    .striped(true)
                    .min_col_width(120.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(COUNTRY_COLUMN).strong());
                        ui.label(RichText::new(IMPRESSIONS_COLUMN).strong());
                        ui.end_row();

                        for entry in selected.entries() {
                            ui.label(&entry.country);
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(group_thousands(u128::from(entry.impressions)));
                                },
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}
