use crate::error::{DashboardError, Result};
use eframe::egui;
use polars::prelude::AnyValue;
use std::path::Path;

/// Formats an optional f64 to 4 decimal places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "—".to_owned(),
    }
}

/// Cell text without the quotes `AnyValue`'s `Display` puts around strings.
pub fn cell_text(value: &AnyValue<'_>) -> String {
    if let Some(s) = value.get_str() {
        s.to_owned()
    } else if value.is_null() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Checks that a decorative asset exists.
///
/// # Errors
///
/// [`DashboardError::MissingAsset`] when `path` is not a file.
pub fn require_asset(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(DashboardError::MissingAsset(path.to_path_buf()))
    }
}

pub fn render_error(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(crate::theme::ERROR_FILL)
        .inner_margin(egui::Margin::same(8))
        .corner_radius(egui::CornerRadius::same(6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(crate::theme::ERROR_TEXT, message);
        });
}

pub fn render_status_message(ui: &mut egui::Ui, status: &str) {
    if !status.is_empty() {
        ui.label(egui::RichText::new(status).weak().italics());
    }
}
