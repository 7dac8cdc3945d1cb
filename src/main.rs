//! # Residuos entry point
//!
//! Without a subcommand the dashboard window opens. Subcommands print the
//! same aggregations to the terminal:
//!
//! ```bash
//! residuos
//! residuos --data otro.csv summary
//! residuos counts --column REG_NAT --department LIMA
//! residuos histogram --column QRESIDUOS_MUN
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use residuos::gui::DashboardApp;

fn main() -> Result<()> {
    if let Err(err) = residuos::logging::init() {
        residuos::logging::init_console()?;
        tracing::warn!("File logging unavailable: {err:#}");
    }

    let cli = cli::Cli::parse();
    let mut settings = residuos::config::load_settings(cli.config.as_deref())
        .context("Failed to load settings")?;
    if let Some(data) = cli.data {
        settings.data_path = data;
    }

    if let Some(command) = cli.command {
        return cli::run_command(command, &settings);
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Residuos Municipales")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Residuos Municipales",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings)))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to start the window: {err}"))
}
