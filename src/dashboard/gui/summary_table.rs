use crate::dashboard::logic::StatsTable;
use crate::utils::fmt_opt;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

/// `describe()`-style grid: one row per statistic, one column per numeric
/// column of the table.
pub fn render_summary_table(ui: &mut egui::Ui, stats: &StatsTable) {
    egui::ScrollArea::horizontal()
        .id_salt("summary_scroll")
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .id_salt("summary_table")
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
                .column(Column::auto().at_least(60.0)) // Statistic
                .min_scrolled_height(0.0);
            for _ in &stats.columns {
                table = table.column(Column::auto().at_least(90.0));
            }

            table
                .header(24.0, |mut header| {
                    header.col(|_| {});
                    for col in &stats.columns {
                        header.col(|ui| {
                            ui.strong(&col.name);
                        });
                    }
                })
                .body(|mut body| {
                    for (i, label) in StatsTable::ROW_LABELS.iter().enumerate() {
                        body.row(20.0, |mut row| {
                            row.col(|ui| {
                                ui.strong(*label);
                            });
                            for col in &stats.columns {
                                let value = col.values().get(i).copied().flatten();
                                row.col(|ui| {
                                    // count is a whole number, the rest are measurements.
                                    let text = if i == 0 {
                                        col.count.to_string()
                                    } else {
                                        fmt_opt(value)
                                    };
                                    ui.monospace(text);
                                });
                            }
                        });
                    }
                });
        });
}
