//! Report Viewer Widget
//! Central panel: summary metric, pie chart and data table for the current selection.

use crate::charts::{pie_slices, ChartPlotter, PieSlice};
use crate::data::Report;
use egui::{Color32, RichText, ScrollArea};

const PIE_HEIGHT: f32 = 420.0;

/// Scrollable report area. Holds only what the last selection produced.
#[derive(Default)]
pub struct ChartViewer {
    report: Option<Report>,
    slices: Vec<PieSlice>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
        self.slices.clear();
    }

    pub fn set_report(&mut self, report: Report) {
        self.slices = pie_slices(report.selected());
        self.report = Some(report);
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Draw the report
    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new("🌍 Organic Google Search Impressions by Country")
                        .size(24.0)
                        .strong(),
                );
                ui.label(
                    RichText::new("Analyze total impressions by country from a local file.")
                        .color(Color32::GRAY),
                );
                ui.add_space(15.0);

                // Summary
                ui.label(RichText::new("📊 Summary Metrics").size(18.0).strong());
                ui.add_space(5.0);
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new("Total Impressions (Selected Countries)")
                                .size(13.0)
                                .color(Color32::GRAY),
                        );
                        ui.label(RichText::new(report.summary().to_string()).size(32.0).strong());
                    });
                ui.add_space(15.0);

                // Chart
                ui.label(RichText::new("📈 Impressions by Country").size(18.0).strong());
                ui.add_space(5.0);
                if report.is_empty() {
                    ui.label(
                        RichText::new("No data to display for selected countries.")
                            .color(Color32::from_rgb(100, 149, 237)),
                    );
                } else {
                    ChartPlotter::draw_pie_chart(ui, &self.slices, PIE_HEIGHT);
                }
                ui.add_space(15.0);

                // Table
                ui.label(RichText::new("🔍 Data Table").size(18.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_data_table(ui, report.selected());
            });
    }
}
