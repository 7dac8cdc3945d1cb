//! Light report look: white page, grey notes pane, green for anything the
//! user can act on and a fixed qualitative palette for category charts.

use eframe::egui::{self, Color32, CornerRadius, Margin, Shadow, Stroke};

/// Recycling green, used by buttons, selections and single-series charts.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(46, 125, 50);
const ACCENT_HOVER: Color32 = Color32::from_rgb(67, 160, 71);

const PAGE_FILL: Color32 = Color32::from_rgb(255, 255, 255);
const NOTES_FILL: Color32 = Color32::from_rgb(240, 242, 246);
const SECTION_BORDER: Color32 = Color32::from_rgb(226, 228, 234);
const TEXT_COLOR: Color32 = Color32::from_rgb(49, 51, 63);

pub const ERROR_FILL: Color32 = Color32::from_rgb(255, 235, 235);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(125, 53, 59);

// Spacing constants
pub const SPACING_TINY: f32 = 4.0;
pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;
pub const SPACING_LARGE: f32 = 20.0;

/// Slice colours, cycled when a column has more categories than entries.
const CATEGORY_PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203, 82),
];

pub fn apply_dashboard_theme(ctx: &egui::Context) {
    ctx.set_theme(egui::Theme::Light);

    let mut visuals = egui::Visuals::light();
    visuals.override_text_color = Some(TEXT_COLOR);
    visuals.panel_fill = PAGE_FILL;
    visuals.faint_bg_color = PAGE_FILL;
    visuals.extreme_bg_color = NOTES_FILL;

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = CornerRadius::same(4);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT_HOVER);
    visuals.widgets.active.bg_fill = ACCENT_COLOR;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.selection.bg_fill = ACCENT_COLOR.linear_multiply(0.25);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_COLOR);
    visuals.hyperlink_color = ACCENT_COLOR;

    ctx.style_mut(|style| {
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
    });
}

/// Frame around one page section (controls, chart).
pub fn section_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().panel_fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(16, 12))
        .stroke(Stroke::new(1.0, SECTION_BORDER))
        .shadow(Shadow {
            offset: [0, 1],
            blur: 4,
            spread: 0,
            color: Color32::from_black_alpha(18),
        })
}

pub fn sidebar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(NOTES_FILL)
        .inner_margin(Margin::symmetric(16, 20))
}

pub fn series_color(index: usize) -> Color32 {
    CATEGORY_PALETTE
        .get(index % CATEGORY_PALETTE.len())
        .copied()
        .unwrap_or(ACCENT_COLOR)
}
