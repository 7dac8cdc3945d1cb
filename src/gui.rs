use crate::config::DashboardSettings;
use crate::dashboard::App;
use crate::dashboard::model::ViewPrefs;
use eframe::egui;
use rfd::FileDialog;
use std::path::PathBuf;

const PREFS_KEY: &str = "view_prefs";

const INTRO: &str = "En el Perú, la gestión eficiente de los residuos sólidos municipales es un \
desafío prioritario. Esta página web presenta los datos de generación anual de residuos \
municipales para las 24 regiones del país, información fundamental para desarrollar políticas \
y estrategias de recolección, transporte, tratamiento y disposición final adecuados. Los datos \
provienen de informes técnicos y estadísticas oficiales del Ministerio del Ambiente y otras \
entidades, y serán actualizados periódicamente para brindar un panorama confiable sobre la \
situación de los residuos sólidos a nivel regional y nacional.";

/// Window of the dashboard: the notes sidebar and the scrollable page.
pub struct DashboardApp {
    settings: DashboardSettings,
    dashboard: App,
    /// Canonical image path, or the message shown in its place.
    image: Result<PathBuf, String>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: DashboardSettings) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        crate::theme::apply_dashboard_theme(&cc.egui_ctx);

        // Only the view choices survive a restart; the data is always re-read.
        let prefs = cc
            .storage
            .and_then(|storage| eframe::get_value::<ViewPrefs>(storage, PREFS_KEY))
            .unwrap_or_default();

        let image = crate::utils::require_asset(&settings.image_path)
            .map(|path| path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
            .map_err(|err| {
                tracing::warn!("{err}");
                err.to_string()
            });

        let dashboard = App::new(&settings, prefs);
        Self {
            settings,
            dashboard,
            image,
        }
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("notes_pane")
            .resizable(true)
            .default_width(240.0)
            .frame(crate::theme::sidebar_frame())
            .show(ctx, |ui| {
                ui.add_space(crate::theme::SPACING_MEDIUM);
                ui.heading("Notas:");
                ui.label("Visualizar datos de residuos municipales anuales.");

                ui.add_space(crate::theme::SPACING_LARGE);
                ui.heading("Contacto:");
                ui.label("Para más información, contactar a:");
                for line in &self.settings.contact {
                    ui.label(line);
                }

                ui.add_space(crate::theme::SPACING_LARGE);
                ui.separator();
                if ui.button("📂 Abrir archivo").clicked() {
                    self.pick_dataset();
                }
                ui.label(
                    egui::RichText::new(self.settings.data_path.display().to_string())
                        .small()
                        .weak(),
                );
            });
    }

    fn pick_dataset(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv", "txt"])
            .pick_file()
        else {
            return;
        };
        tracing::info!(path = %path.display(), "Dataset picked");
        self.dashboard.open(&path, &self.settings);
        self.settings.data_path = path;
    }

    fn render_intro(&self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("🚮 RESIDUOS MUNICIPALES GENERADOS ANUALMENTE").strong());
        ui.add_space(crate::theme::SPACING_SMALL);
        ui.label(
            egui::RichText::new("Residuos municipales generados por periodo y región").size(18.0),
        );
        ui.add_space(crate::theme::SPACING_SMALL);
        ui.label(INTRO);
        ui.add_space(crate::theme::SPACING_MEDIUM);

        match &self.image {
            Ok(path) => {
                let uri = format!("file://{}", path.display());
                ui.add(
                    egui::Image::new(uri)
                        .max_width(ui.available_width())
                        .corner_radius(egui::CornerRadius::same(6)),
                );
                ui.label(
                    egui::RichText::new("Imagen 1: Residuos sólidos, Problema global")
                        .small()
                        .weak(),
                );
            }
            Err(err) => crate::utils::render_error(ui, err),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_sidebar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_intro(ui);
                    self.dashboard.show(ui);
                });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PREFS_KEY, &self.dashboard.model.prefs);
    }
}
