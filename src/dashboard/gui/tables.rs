use crate::utils::cell_text;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use polars::prelude::DataFrame;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Scrollable view of `df`. Only the first `max_rows` rows are offered and
/// only the visible ones are formatted.
pub fn render_frame(ui: &mut egui::Ui, id_salt: &str, df: &DataFrame, max_rows: usize) {
    if df.width() == 0 {
        ui.label(egui::RichText::new("Tabla vacía").weak());
        return;
    }
    let shown = df.height().min(max_rows);

    ui.push_id(id_salt, |ui| {
        egui::ScrollArea::horizontal()
            .id_salt(("frame_scroll", id_salt))
            .show(ui, |ui| {
                let mut table = TableBuilder::new(ui)
                    .id_salt(id_salt)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .max_scroll_height(MAX_TABLE_HEIGHT)
                    .min_scrolled_height(0.0);
                for _ in df.get_columns() {
                    table = table.column(Column::auto().at_least(60.0).clip(true));
                }

                table
                    .header(ROW_HEIGHT + 4.0, |mut header| {
                        for name in df.get_column_names() {
                            header.col(|ui| {
                                ui.strong(name.as_str());
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, shown, |mut row| {
                            let index = row.index();
                            for column in df.get_columns() {
                                row.col(|ui| {
                                    let text = column
                                        .get(index)
                                        .map(|value| cell_text(&value))
                                        .unwrap_or_default();
                                    ui.label(text);
                                });
                            }
                        });
                    });
            });
    });

    if shown < df.height() {
        ui.label(
            egui::RichText::new(format!(
                "Mostrando {shown} de {} filas",
                df.height()
            ))
            .small()
            .weak(),
        );
    } else if shown == 0 {
        ui.label(egui::RichText::new("Sin filas").weak());
    }
}
