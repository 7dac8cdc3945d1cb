//! Data sections of the dashboard page.
//!
//! Everything drawn here is a function of the [`DashboardModel`]: the raw
//! table, the chart controls, the last generated chart with its drill-down,
//! and the statistics of the unfiltered table.

use super::model::{DashboardModel, ViewPrefs};
use crate::config::DashboardSettings;
use eframe::egui;
use std::path::Path;

mod controls;
mod plots;
mod summary_table;
mod tables;

use controls::{render_chart_controls, render_detail_selector};
use plots::render_chart;
use summary_table::render_summary_table;
use tables::render_frame;

pub struct App {
    pub model: DashboardModel,
    pub preview_rows: usize,
    pub status: String,
}

impl App {
    pub fn new(settings: &DashboardSettings, prefs: ViewPrefs) -> Self {
        let mut app = Self {
            model: DashboardModel::new(settings.chart_columns, prefs),
            preview_rows: settings.preview_rows,
            status: String::new(),
        };
        app.open(&settings.data_path, settings);
        app
    }

    /// Loads `path`, keeping the outcome in the status line.
    pub fn open(&mut self, path: &Path, settings: &DashboardSettings) {
        let options = match settings.load_options() {
            Ok(options) => options,
            Err(err) => {
                tracing::error!("Invalid load options: {err}");
                self.model.record_failure(&err);
                return;
            }
        };

        if self.model.load(path, &options).is_ok()
            && let Some(dataset) = &self.model.dataset
        {
            self.status = format!(
                "{}: {} filas, {} columnas",
                dataset.source().display(),
                dataset.row_count(),
                dataset.df().width()
            );
        } else {
            self.status.clear();
        }
    }

    /// Draws every data section, or only the load error when there is no
    /// table to draw from.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(err) = &self.model.load_error {
            crate::utils::render_error(ui, err);
            return;
        }
        if let Some(notice) = &self.model.notice {
            crate::utils::render_error(ui, notice);
        }
        let Some(dataset) = self.model.dataset.clone() else {
            return;
        };

        ui.add_space(crate::theme::SPACING_MEDIUM);
        ui.heading("Datos del archivo CSV");
        crate::utils::render_status_message(ui, &self.status);
        render_frame(ui, "raw_data", dataset.df(), self.preview_rows);

        ui.add_space(crate::theme::SPACING_LARGE);
        render_chart_controls(self, ui);

        if let Some(chart) = &self.model.chart {
            ui.add_space(crate::theme::SPACING_MEDIUM);
            render_chart(ui, chart);
        }

        if self.model.chart.is_some() {
            render_detail_selector(self, ui);
        }

        if let Some(detail) = &self.model.detail {
            ui.add_space(crate::theme::SPACING_SMALL);
            match &detail.rows {
                Ok(rows) => {
                    render_frame(ui, "detail_rows", rows, self.preview_rows);
                    if let Some(districts) = &detail.districts {
                        ui.add_space(crate::theme::SPACING_SMALL);
                        ui.label("Información de distritos y sus ubicaciones:");
                        render_frame(ui, "detail_districts", districts, self.preview_rows);
                    }
                }
                Err(err) => crate::utils::render_error(ui, err),
            }
        }

        ui.add_space(crate::theme::SPACING_LARGE);
        ui.heading("Resumen estadístico");
        match &self.model.summary {
            Some(Ok(stats)) if stats.is_empty() => {
                ui.label("La tabla no tiene columnas numéricas.");
            }
            Some(Ok(stats)) => render_summary_table(ui, stats),
            Some(Err(err)) => crate::utils::render_error(ui, err),
            None => {}
        }
    }
}
