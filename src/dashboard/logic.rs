//! Data side of the dashboard: loading, cascading filters, chart
//! aggregations and descriptive statistics. Nothing here touches `egui`.

pub mod charts;
pub mod filter;
pub mod io;
pub mod summary;
pub mod types;

pub use charts::{
    build_chart, chart_columns, district_lookup, drill_down, log_bin_edges, log_histogram,
    value_counts,
};
pub use filter::{CascadeOutcome, apply_cascade, charting_table, distinct_values, level_options};
pub use io::load_dataset;
pub use summary::summarize;
pub use types::*;
