use crate::dashboard::gui::App;
use crate::dashboard::logic::{ChartData, ChartKind, FilterLevel, LevelChoice, Mode, NULL_LABEL};
use eframe::egui;

struct LevelRow {
    level: FilterLevel,
    options: Vec<LevelChoice>,
}

pub fn render_chart_controls(app: &mut App, ui: &mut egui::Ui) {
    crate::theme::section_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("chart_controls")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Selecciona configuracion del grafico");
                egui::ComboBox::from_id_salt("mode")
                    .selected_text(app.model.prefs.mode.label())
                    .show_ui(ui, |ui| {
                        for mode in Mode::ALL {
                            ui.selectable_value(&mut app.model.prefs.mode, mode, mode.label());
                        }
                    });
                ui.end_row();

                if app.model.prefs.mode == Mode::Advanced {
                    render_cascade(app, ui);
                }

                ui.label("Selecciona el tipo de gráfico");
                egui::ComboBox::from_id_salt("chart_kind")
                    .selected_text(app.model.prefs.chart_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in ChartKind::ALL {
                            ui.selectable_value(
                                &mut app.model.prefs.chart_kind,
                                kind,
                                kind.label(),
                            );
                        }
                    });
                ui.end_row();

                render_column_selector(app, ui);
            });

        ui.add_space(crate::theme::SPACING_SMALL);
        let can_generate = app.model.current_request().is_some();
        if ui
            .add_enabled(
                can_generate,
                egui::Button::new(egui::RichText::new("📊 Generar gráfico").strong()),
            )
            .clicked()
        {
            app.model.generate_chart();
        }

        if app.model.prefs.mode == Mode::Advanced {
            render_filter_status(app, ui);
        }
    });
}

fn render_column_selector(app: &mut App, ui: &mut egui::Ui) {
    let columns = app.model.chart_columns();
    ui.label("Selecciona una columna para visualizar");
    if columns.is_empty() {
        ui.label(egui::RichText::new("El archivo no tiene columnas para graficar.").weak());
    } else {
        let selected = app.model.chart_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("chart_column")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for name in &columns {
                    ui.selectable_value(&mut app.model.chart_column, Some(name.clone()), name);
                }
            });
    }
    ui.end_row();
}

fn render_cascade(app: &mut App, ui: &mut egui::Ui) {
    let rows: Vec<LevelRow> = match app.model.cascade() {
        Some(Ok(outcome)) => outcome
            .levels
            .iter()
            .map(|state| LevelRow {
                level: state.level,
                options: state.options.clone(),
            })
            .collect(),
        Some(Err(err)) => {
            ui.label("Filtros");
            crate::utils::render_error(ui, &err);
            ui.end_row();
            return;
        }
        None => return,
    };

    let mut blocked = false;
    for row in rows {
        let current = app.model.selection.get(row.level).clone();
        let mut chosen = current.clone();

        ui.label(format!("Selecciona {}", row.level.label()));
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt(("level", row.level.column()))
                .selected_text(chosen.to_string())
                .height(320.0)
                .show_ui(ui, |ui| {
                    for option in &row.options {
                        ui.selectable_value(&mut chosen, option.clone(), option.to_string());
                    }
                });
            if blocked && !current.is_all() {
                ui.label(egui::RichText::new("sin efecto: un nivel superior está en ALL").weak())
                    .on_hover_text("Con ALL en un nivel, los niveles inferiores no filtran.");
            }
        });
        ui.end_row();

        blocked |= current.is_all();
        if chosen != current {
            app.model.set_level(row.level, chosen);
        }
    }
}

fn render_filter_status(app: &mut App, ui: &mut egui::Ui) {
    let Some(Ok(outcome)) = app.model.cascade() else {
        return;
    };
    let applied: Vec<FilterLevel> = outcome.applied_levels().collect();
    let rows = outcome.table.height();

    let text = if applied.is_empty() {
        format!("Sin filtros · {rows} filas")
    } else {
        let parts: Vec<String> = applied
            .into_iter()
            .map(|level| format!("{} = {}", level.column(), app.model.selection.get(level)))
            .collect();
        format!("Filtro aplicado: {} · {rows} filas", parts.join(", "))
    };
    ui.add_space(crate::theme::SPACING_TINY);
    crate::utils::render_status_message(ui, &text);
}

pub fn render_detail_selector(app: &mut App, ui: &mut egui::Ui) {
    let Some(chart) = &app.model.chart else {
        return;
    };
    let Ok(ChartData::Bar(bars)) = &chart.data else {
        return;
    };
    if bars.is_empty() {
        return;
    }
    let values: Vec<Option<String>> = bars.iter().map(|bar| bar.value.clone()).collect();

    // The first value stays selected until another is picked.
    let mut chosen = match &app.model.detail {
        Some(detail) => detail.value.clone(),
        None => values.first().cloned().flatten(),
    };

    ui.add_space(crate::theme::SPACING_MEDIUM);
    ui.heading("Detalles adicionales");
    ui.horizontal(|ui| {
        ui.label("Selecciona un valor para ver detalles");
        egui::ComboBox::from_id_salt("detail_value")
            .selected_text(chosen.as_deref().unwrap_or(NULL_LABEL))
            .height(320.0)
            .show_ui(ui, |ui| {
                for value in &values {
                    let label = value.as_deref().unwrap_or(NULL_LABEL);
                    ui.selectable_value(&mut chosen, value.clone(), label);
                }
            });
    });

    app.model.select_detail(chosen);
}
