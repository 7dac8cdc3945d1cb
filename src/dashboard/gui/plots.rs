use crate::dashboard::logic::{ChartData, ChartKind, LogHistogram, ValueCount};
use crate::dashboard::model::RenderedChart;
use eframe::egui;
use egui_plot::{Bar, BarChart, GridMark, Plot};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

const PLOT_HEIGHT: f32 = 320.0;
const PIE_RADIUS: f32 = 140.0;
const PIE_HOLE: f32 = 0.3;

pub fn render_chart(ui: &mut egui::Ui, chart: &RenderedChart) {
    let column = &chart.request.column;
    let heading = match chart.request.kind {
        ChartKind::Pie => format!("Diagrama circular para {column}"),
        ChartKind::Bar => format!("Gráfico de barras para {column}"),
        ChartKind::Histogram => format!("Histograma para {column}"),
    };

    crate::theme::section_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(heading);
        ui.label(egui::RichText::new(format!("Distribución de {column}")).strong());
        ui.add_space(crate::theme::SPACING_SMALL);

        match &chart.data {
            Ok(ChartData::Pie(counts)) => render_pie_chart(ui, counts),
            Ok(ChartData::Bar(counts)) => render_bar_chart(ui, column, counts),
            Ok(ChartData::Histogram(histogram)) => render_histogram(ui, column, histogram),
            Err(err) => crate::utils::render_error(ui, err),
        }
    });
}

fn render_bar_chart(ui: &mut egui::Ui, column: &str, counts: &[ValueCount]) {
    if counts.is_empty() {
        ui.label("No hay filas para el filtro seleccionado.");
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, vc)| {
            Bar::new(i as f64, vc.count as f64)
                .width(0.7)
                .name(vc.label())
                .fill(crate::theme::ACCENT_COLOR)
        })
        .collect();
    let chart = BarChart::new(column, bars)
        .element_formatter(Box::new(|bar, _| format!("{}\nFrecuencia: {}", bar.name, bar.value)));

    let labels: Vec<String> = counts.iter().map(|vc| vc.label().to_owned()).collect();
    Plot::new(("bar_chart", column))
        .height(PLOT_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .x_axis_label(column)
        .y_axis_label("Frecuencia")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Label for a grid mark sitting exactly on a category index.
fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if index < 0.0 || (position - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Bins are drawn in log10 space so each one has the same width; the axis
/// prints the linear value back.
fn render_histogram(ui: &mut egui::Ui, column: &str, histogram: &LogHistogram) {
    let bars: Vec<Bar> = histogram
        .bins()
        .map(|(lo, hi, count)| {
            let (x0, x1) = (lo.log10(), hi.log10());
            Bar::new((x0 + x1) / 2.0, count as f64)
                .width(x1 - x0)
                .name(format!("{lo:.2} .. {hi:.2}"))
                .fill(crate::theme::ACCENT_COLOR.linear_multiply(0.7))
                .stroke(egui::Stroke::new(0.5, crate::theme::ACCENT_COLOR))
        })
        .collect();
    let chart = BarChart::new(column, bars)
        .element_formatter(Box::new(|bar, _| format!("{}\nFrecuencia: {}", bar.name, bar.value)));

    Plot::new(("histogram", column))
        .height(PLOT_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .x_axis_label(format!("{column} (escala logarítmica)"))
        .y_axis_label("Frecuencia")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_linear(10f64.powf(mark.value))
        })
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));

    ui.label(
        egui::RichText::new(format!("{} valores ≥ 1 incluidos", histogram.total()))
            .small()
            .weak(),
    );
}

fn format_linear(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn render_pie_chart(ui: &mut egui::Ui, counts: &[ValueCount]) {
    let total: usize = counts.iter().map(|vc| vc.count).sum();
    if total == 0 {
        ui.label("No hay filas para el filtro seleccionado.");
        return;
    }

    ui.horizontal_top(|ui| {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(PIE_RADIUS * 2.0, PIE_RADIUS * 2.0),
            egui::Sense::hover(),
        );
        let center = rect.center();
        let painter = ui.painter_at(rect);

        let mut start_angle = -FRAC_PI_2;
        let mut slices = Vec::with_capacity(counts.len());
        for (i, vc) in counts.iter().enumerate() {
            let sweep = vc.count as f32 / total as f32 * TAU;
            let color = crate::theme::series_color(i);
            paint_slice(&painter, center, start_angle, sweep, color);
            slices.push((start_angle, start_angle + sweep));
            start_angle += sweep;
        }

        painter.add(egui::Shape::circle_filled(
            center,
            PIE_RADIUS * PIE_HOLE,
            ui.visuals().extreme_bg_color,
        ));

        if let Some(pos) = response.hover_pos()
            && let Some(vc) = hovered_slice(center, pos, &slices).and_then(|i| counts.get(i))
        {
            response.on_hover_text(format!(
                "{}: {} ({:.1}%)",
                vc.label(),
                vc.count,
                percent(vc.count, total)
            ));
        }

        ui.add_space(crate::theme::SPACING_LARGE);
        egui::ScrollArea::vertical()
            .id_salt("pie_legend")
            .max_height(PIE_RADIUS * 2.0)
            .show(ui, |ui| {
                for (i, vc) in counts.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter()
                            .rect_filled(swatch, 2.0, crate::theme::series_color(i));
                        ui.label(format!(
                            "{}: {} ({:.1}%)",
                            vc.label(),
                            vc.count,
                            percent(vc.count, total)
                        ));
                    });
                }
            });
    });
}

/// Slices wider than half a turn are not convex, so each one is painted as a
/// fan of thin wedges.
fn paint_slice(
    painter: &egui::Painter,
    center: egui::Pos2,
    start: f32,
    sweep: f32,
    color: egui::Color32,
) {
    if sweep < 0.001 {
        return;
    }
    let steps = ((sweep / (std::f32::consts::PI / 32.0)).ceil() as usize).max(1);
    let point = |angle: f32| center + egui::vec2(angle.cos(), angle.sin()) * PIE_RADIUS;

    for j in 0..steps {
        let a0 = start + sweep * j as f32 / steps as f32;
        let a1 = start + sweep * (j + 1) as f32 / steps as f32;
        painter.add(egui::Shape::convex_polygon(
            vec![center, point(a0), point(a1)],
            color,
            egui::Stroke::NONE,
        ));
    }
    painter.line_segment(
        [center, point(start)],
        egui::Stroke::new(1.0, color.gamma_multiply(0.5)),
    );
}

fn hovered_slice(center: egui::Pos2, pos: egui::Pos2, slices: &[(f32, f32)]) -> Option<usize> {
    let offset = pos - center;
    let distance = offset.length();
    if distance < PIE_RADIUS * PIE_HOLE || distance > PIE_RADIUS {
        return None;
    }
    // Slices start at the top, so shift atan2 into [-pi/2, 3pi/2).
    let mut angle = offset.y.atan2(offset.x);
    if angle < -FRAC_PI_2 {
        angle += TAU;
    }
    slices
        .iter()
        .position(|&(start, end)| angle >= start && angle < end)
}

fn percent(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_whole_indices() {
        let labels = vec!["COSTA".to_owned(), "SIERRA".to_owned()];
        assert_eq!(category_label(&labels, 0.0), "COSTA");
        assert_eq!(category_label(&labels, 1.0), "SIERRA");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn test_hovered_slice_from_top_clockwise() {
        let center = egui::pos2(0.0, 0.0);
        // Two halves: right side first (screen y grows downwards).
        let slices = [(-FRAC_PI_2, FRAC_PI_2), (FRAC_PI_2, 3.0 * FRAC_PI_2)];
        assert_eq!(hovered_slice(center, egui::pos2(100.0, 0.0), &slices), Some(0));
        assert_eq!(hovered_slice(center, egui::pos2(-100.0, 0.0), &slices), Some(1));
        assert_eq!(hovered_slice(center, egui::pos2(-100.0, -10.0), &slices), Some(1));
        assert_eq!(hovered_slice(center, egui::pos2(5.0, 0.0), &slices), None);
        assert_eq!(hovered_slice(center, egui::pos2(500.0, 0.0), &slices), None);
    }

    #[test]
    fn test_format_linear() {
        assert_eq!(format_linear(1.0), "1.0");
        assert_eq!(format_linear(1000.0), "1000");
    }
}
