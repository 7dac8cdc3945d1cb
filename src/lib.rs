//! # Residuos - municipal solid-waste dashboard
//!
//! Desktop dashboard over the yearly municipal waste generation table
//! published for Peru's regions: a `;`-separated Latin-1 CSV with one row per
//! district and period.
//!
//! ## Quick Start
//!
//! ```no_run
//! use residuos::dashboard::logic::{self, ChartKind, LoadOptions};
//!
//! # fn main() -> residuos::error::Result<()> {
//! let dataset = logic::load_dataset("data.csv".as_ref(), &LoadOptions::default())?;
//! let chart = logic::build_chart(dataset.df(), "REG_NAT", ChartKind::Bar)?;
//! println!("{chart:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`dashboard`]: the data sections of the page
//!   - [`dashboard::logic`]: loading, cascading filter, charts, statistics
//!   - [`dashboard::model`]: widget state and cached derived data
//! - [`gui`]: the `eframe` window around the dashboard
//! - [`config`]: settings file
//! - [`error`]: error type shared by the library
//! - [`logging`]: `tracing` setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod gui;
pub mod logging;
pub mod theme;
pub mod utils;
