#![expect(clippy::print_stdout)]

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use residuos::config::DashboardSettings;
use residuos::dashboard::logic::{
    Dataset, FilterLevel, FilterSelection, LevelChoice, apply_cascade, load_dataset,
    log_histogram, summarize, value_counts,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "residuos",
    about = "Municipal solid-waste dashboard",
    version
)]
pub struct Cli {
    /// Settings file. Defaults to `<config dir>/residuos/config.json`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV to read instead of the configured one.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the descriptive statistics of every numeric column
    Summary,
    /// Print the frequency of each value of a column
    Counts {
        #[arg(short, long)]
        column: String,

        /// Keep only rows of this REG_NAT
        #[arg(long)]
        region: Option<String>,

        /// Keep only rows of this DEPARTAMENTO
        #[arg(long)]
        department: Option<String>,

        /// Keep only rows of this PROVINCIA
        #[arg(long)]
        province: Option<String>,

        /// Keep only rows of this DISTRITO
        #[arg(long)]
        district: Option<String>,
    },
    /// Print the log-binned histogram of a numeric column
    Histogram {
        #[arg(short, long)]
        column: String,
    },
}

pub fn run_command(command: Commands, settings: &DashboardSettings) -> Result<()> {
    let dataset = load(settings)?;
    match command {
        Commands::Summary => handle_summary(&dataset),
        Commands::Counts {
            column,
            region,
            department,
            province,
            district,
        } => {
            let selection = FilterSelection::new(
                choice(region),
                choice(department),
                choice(province),
                choice(district),
            );
            handle_counts(&dataset, &column, &selection)
        }
        Commands::Histogram { column } => handle_histogram(&dataset, &column),
    }
}

fn load(settings: &DashboardSettings) -> Result<Dataset> {
    let options = settings.load_options()?;
    let dataset = load_dataset(&settings.data_path, &options)
        .with_context(|| format!("Failed to load {}", settings.data_path.display()))?;
    println!(
        "{}: {} filas, {} columnas",
        dataset.source().display(),
        dataset.row_count(),
        dataset.df().width()
    );
    Ok(dataset)
}

fn choice(value: Option<String>) -> LevelChoice {
    value.map_or(LevelChoice::All, LevelChoice::Value)
}

fn handle_summary(dataset: &Dataset) -> Result<()> {
    let stats = summarize(dataset.df())?;
    if stats.is_empty() {
        println!("La tabla no tiene columnas numéricas.");
        return Ok(());
    }

    print!("{:>8}", "");
    for col in &stats.columns {
        print!("  {:>16}", col.name);
    }
    println!();
    for (i, label) in residuos::dashboard::logic::StatsTable::ROW_LABELS
        .iter()
        .enumerate()
    {
        print!("{label:>8}");
        for col in &stats.columns {
            let text = if i == 0 {
                col.count.to_string()
            } else {
                residuos::utils::fmt_opt(col.values().get(i).copied().flatten())
            };
            print!("  {text:>16}");
        }
        println!();
    }
    Ok(())
}

fn handle_counts(dataset: &Dataset, column: &str, selection: &FilterSelection) -> Result<()> {
    let outcome = apply_cascade(dataset.df(), selection)?;
    for level in FilterLevel::ORDER {
        if !outcome.is_applied(level) && !selection.get(level).is_all() {
            println!(
                "Aviso: el filtro {} no se aplica porque un nivel superior está en ALL",
                level.column()
            );
        }
    }

    let counts = value_counts(&outcome.table, column)?;
    let width = counts.iter().map(|vc| vc.label().len()).max().unwrap_or(0);
    for vc in &counts {
        println!("{:<width$}  {}", vc.label(), vc.count);
    }
    println!("Total: {}", counts.iter().map(|vc| vc.count).sum::<usize>());
    Ok(())
}

fn handle_histogram(dataset: &Dataset, column: &str) -> Result<()> {
    let histogram = log_histogram(dataset.df(), column)?;
    for (lo, hi, count) in histogram.bins() {
        println!("[{lo:>12.2}, {hi:>12.2})  {count}");
    }
    println!("Total: {}", histogram.total());
    Ok(())
}
