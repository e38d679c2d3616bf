//! Control Panel Widget
//! Left side panel: data source, country selection and downloads.

use crate::data::DEFAULT_SELECTION_LEN;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// User settings for the current session
#[derive(Clone)]
pub struct UserSettings {
    pub source_path: Option<PathBuf>,
    pub open_after_export: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            source_path: None,
            open_after_export: true,
        }
    }
}

/// Status line severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Left side control panel with file selection, country filter and exports.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub countries: Vec<String>,
    pub selected: Vec<bool>,
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            countries: Vec::new(),
            selected: Vec::new(),
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the country options after a load; `defaults` start checked.
    pub fn update_countries(&mut self, countries: Vec<String>, defaults: &[String]) {
        self.selected = countries.iter().map(|c| defaults.contains(c)).collect();
        self.countries = countries;
    }

    pub fn clear_countries(&mut self) {
        self.countries.clear();
        self.selected.clear();
    }

    /// Checked countries, in option order.
    pub fn selected_countries(&self) -> Vec<String> {
        self.countries
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(country, _)| country.clone())
            .collect()
    }

    fn select_top(&mut self, n: usize) {
        for (i, v) in self.selected.iter_mut().enumerate() {
            *v = i < n;
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let has_data = !self.countries.is_empty();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Search Impressions")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Organic Google Search by Country")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .source_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.source_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseSource;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Country Selection Section =====
        ui.label(RichText::new("🔧 Select Countries to display").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(has_data, |ui| {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                        for (i, country) in self.countries.iter().enumerate() {
                            if i < self.selected.len()
                                && ui.checkbox(&mut self.selected[i], country).changed()
                            {
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button(format!("Top {}", DEFAULT_SELECTION_LEN)).clicked() {
                    self.select_top(DEFAULT_SELECTION_LEN);
                    action = ControlPanelAction::SelectionChanged;
                }
                if ui.small_button("Select All").clicked() {
                    self.selected.iter_mut().for_each(|v| *v = true);
                    action = ControlPanelAction::SelectionChanged;
                }
                if ui.small_button("Clear All").clicked() {
                    self.selected.iter_mut().for_each(|v| *v = false);
                    action = ControlPanelAction::SelectionChanged;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Download Buttons =====
        ui.label(RichText::new("📥 Downloads").size(14.0).strong());
        ui.add_space(5.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(has_data, |ui| {
                let size = egui::vec2(200.0, 30.0);
                if ui
                    .add(egui::Button::new(RichText::new("📥 Download CSV").size(14.0)).min_size(size))
                    .clicked()
                {
                    action = ControlPanelAction::ExportCsv;
                }
                ui.add_space(5.0);
                if ui
                    .add(egui::Button::new(RichText::new("📥 Download HTML").size(14.0)).min_size(size))
                    .clicked()
                {
                    action = ControlPanelAction::ExportHtml;
                }
                ui.add_space(5.0);
                if ui
                    .add(egui::Button::new(RichText::new("📄 Download Chart").size(14.0)).min_size(size))
                    .clicked()
                {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });
        ui.add_space(5.0);
        ui.checkbox(&mut self.settings.open_after_export, "Open after export");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = match self.status_kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line text
    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseSource,
    SelectionChanged,
    ExportCsv,
    ExportHtml,
    ExportChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        let mut panel = ControlPanel::new();
        let countries: Vec<String> = ["US", "JP", "DE", "FR"].iter().map(|s| s.to_string()).collect();
        panel.update_countries(countries, &["US".to_string(), "DE".to_string()]);
        panel
    }

    #[test]
    fn test_defaults_start_checked() {
        assert_eq!(panel().selected_countries(), vec!["US", "DE"]);
    }

    #[test]
    fn test_select_top_keeps_option_order() {
        let mut panel = panel();
        panel.select_top(3);
        assert_eq!(panel.selected_countries(), vec!["US", "JP", "DE"]);
    }

    #[test]
    fn test_clear_countries() {
        let mut panel = panel();
        panel.clear_countries();
        assert!(panel.selected_countries().is_empty());
    }
}
