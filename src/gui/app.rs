//! Dashboard Main Application
//! Main window with control panel and report viewer.

use crate::data::{Report, Session};
use crate::export::{CSV_FILE_NAME, HTML_FILE_NAME, SVG_FILE_NAME};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusKind};
use anyhow::{Context, Result};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{error, info};

/// Size of the downloadable SVG chart
const CHART_EXPORT_SIZE: (u32, u32) = (1000, 600);

/// Which export the user asked for
#[derive(Debug, Clone, Copy)]
enum ExportKind {
    Csv,
    Html,
    Chart,
}

impl ExportKind {
    fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            ExportKind::Csv => ("CSV", &["csv"]),
            ExportKind::Html => ("HTML", &["html"]),
            ExportKind::Chart => ("SVG Image", &["svg"]),
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            ExportKind::Csv => CSV_FILE_NAME,
            ExportKind::Html => HTML_FILE_NAME,
            ExportKind::Chart => SVG_FILE_NAME,
        }
    }

    fn render(self, report: &Report) -> Result<Vec<u8>> {
        let bytes = match self {
            ExportKind::Csv => report.to_csv_bytes()?,
            ExportKind::Html => report.to_html_bytes(),
            ExportKind::Chart => {
                let (w, h) = CHART_EXPORT_SIZE;
                report.chart_svg(w, h)?.into_bytes()
            }
        };
        Ok(bytes)
    }
}

/// Main application window.
pub struct DashboardApp {
    session: Option<Session>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Handle source file selection
    fn handle_browse_source(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Data Files", &["csv", "xlsx", "xlsm", "xls", "ods"])
            .pick_file()
        else {
            return;
        };

        // Drop the previous source before loading
        self.session = None;
        self.chart_viewer.clear();
        self.control_panel.clear_countries();
        self.control_panel.settings.source_path = Some(path.clone());

        match Session::load_path(&path, None) {
            Ok(session) => {
                let countries = session.countries();
                self.control_panel
                    .update_countries(countries.clone(), &session.default_selection());
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!(
                        "Loaded {} rows, {} countries",
                        session.raw().row_count(),
                        countries.len()
                    ),
                );
                self.session = Some(session);
                self.refresh_report();
            }
            Err(e) => {
                error!(path = %path.display(), "failed to load source: {e}");
                self.control_panel
                    .set_status(StatusKind::Error, format!("⚠️ Error processing file: {e}"));
            }
        }
    }

    /// Recompute the report from the session's aggregate and the panel's selection
    fn refresh_report(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let selected = self.control_panel.selected_countries();
        self.chart_viewer.set_report(session.report(Some(&selected)));
    }

    /// Handle a download button
    fn handle_export(&mut self, kind: ExportKind) {
        match self.export(kind) {
            Ok(Some(path)) => {
                info!(path = %path.display(), ?kind, "export written");
                self.control_panel
                    .set_status(StatusKind::Success, format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(e) => {
                error!(?kind, "export failed: {e:#}");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {e:#}"));
            }
        }
    }

    fn export(&self, kind: ExportKind) -> Result<Option<PathBuf>> {
        let Some(report) = self.chart_viewer.report() else {
            return Ok(None);
        };

        let (filter_name, extensions) = kind.filter();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .set_file_name(kind.file_name())
            .save_file()
        else {
            return Ok(None); // User cancelled
        };

        let bytes = kind.render(report)?;
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if self.control_panel.settings.open_after_export {
            open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        }

        Ok(Some(path))
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseSource => self.handle_browse_source(),
                        ControlPanelAction::SelectionChanged => self.refresh_report(),
                        ControlPanelAction::ExportCsv => self.handle_export(ExportKind::Csv),
                        ControlPanelAction::ExportHtml => self.handle_export(ExportKind::Html),
                        ControlPanelAction::ExportChart => self.handle_export(ExportKind::Chart),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
