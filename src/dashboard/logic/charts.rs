//! Aggregations behind each chart kind, plus the bar-chart drill-down.

use super::filter::{filter_equals, require_column};
use super::types::{
    ChartData, ChartKind, ColumnRange, DEPARTMENT_COLUMN, DISTRICT_COLUMN, LogHistogram,
    ValueCount,
};
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// Number of log-spaced edges; the histogram has one bin fewer.
pub const HISTOGRAM_EDGES: usize = 10;

/// Names of the columns at the configured positions, clipped to the table width.
pub fn chart_columns(df: &DataFrame, range: ColumnRange) -> Vec<String> {
    df.get_column_names()
        .iter()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .map(|name| name.to_string())
        .collect()
}

/// Rows per distinct value of `column`, nulls included as a `None` bucket.
///
/// Sorted by count descending, ties by value ascending, with the null
/// bucket last among equals.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] when `column` does not exist.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<ValueCount>> {
    let text = require_column(df, column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = text.str()?;

    let mut freq: HashMap<Option<&str>, usize> = HashMap::new();
    for value in ca {
        *freq.entry(value).or_default() += 1;
    }

    let mut counts: Vec<ValueCount> = freq
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.map(str::to_owned),
            count,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| match (&a.value, &b.value) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
    });
    Ok(counts)
}

/// `edges[i] = 10^(i/9 · log10(max))` for `i` in `0..10`.
///
/// The last edge is pinned to `max` so rounding never drops the maximum
/// out of the last bin.
pub fn log_bin_edges(max: f64) -> Vec<f64> {
    let top = max.log10();
    let last = HISTOGRAM_EDGES - 1;
    (0..HISTOGRAM_EDGES)
        .map(|i| {
            if i == last {
                max
            } else {
                10f64.powf(i as f64 / last as f64 * top)
            }
        })
        .collect()
}

/// Frequency histogram of `column` over [`log_bin_edges`] of its maximum.
///
/// Bins are `[lo, hi)` except the last, which also holds `max`. Nulls and
/// values below 1 fall outside every bin.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] when the column is missing, not
/// numeric, has no values, or its maximum is not above 1.
pub fn log_histogram(df: &DataFrame, column: &str) -> Result<LogHistogram> {
    let series = require_column(df, column)?.as_materialized_series();
    if !series.dtype().is_numeric() {
        return Err(DashboardError::invalid_column(
            column,
            format!("el histograma requiere datos numéricos (tipo {})", series.dtype()),
        ));
    }

    let values = series.cast(&DataType::Float64)?;
    let ca = values.f64()?;
    let Some(max) = ca.max() else {
        return Err(DashboardError::invalid_column(column, "la columna no tiene valores"));
    };
    if !max.is_finite() || max <= 1.0 {
        return Err(DashboardError::invalid_column(
            column,
            format!("el máximo ({max}) debe ser mayor que 1 para una escala logarítmica"),
        ));
    }

    let edges = log_bin_edges(max);
    let mut counts = vec![0usize; HISTOGRAM_EDGES - 1];
    let last = counts.len() - 1;
    for value in ca.into_iter().flatten() {
        if let Some(bin) = bin_index(&edges, value, last)
            && let Some(slot) = counts.get_mut(bin)
        {
            *slot += 1;
        }
    }

    Ok(LogHistogram { edges, counts })
}

fn bin_index(edges: &[f64], value: f64, last: usize) -> Option<usize> {
    let (first, end) = (edges.first()?, edges.last()?);
    if value < *first || value > *end {
        return None;
    }
    // Only the top edge itself misses every half-open window.
    let bin = edges
        .windows(2)
        .position(|pair| matches!(pair, [lo, hi] if value >= *lo && value < *hi))
        .unwrap_or(last);
    Some(bin)
}

/// # Errors
///
/// Whatever the aggregation for `kind` reports for `column`.
pub fn build_chart(df: &DataFrame, column: &str, kind: ChartKind) -> Result<ChartData> {
    let data = match kind {
        ChartKind::Pie => ChartData::Pie(value_counts(df, column)?),
        ChartKind::Bar => ChartData::Bar(value_counts(df, column)?),
        ChartKind::Histogram => ChartData::Histogram(log_histogram(df, column)?),
    };
    tracing::debug!(column, ?kind, rows = df.height(), "Chart data built");
    Ok(data)
}

/// Rows of the charted table whose `column` equals the selected bar.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] when `column` does not exist.
pub fn drill_down(df: &DataFrame, column: &str, value: Option<&str>) -> Result<DataFrame> {
    filter_equals(df, column, value)
}

/// Deduplicated (`DISTRITO`, `DEPARTAMENTO`) pairs in order of first
/// appearance, or `None` when the table has no `DISTRITO` column.
///
/// # Errors
///
/// Propagates the Polars error of the projection.
pub fn district_lookup(df: &DataFrame) -> Result<Option<DataFrame>> {
    if df.column(DISTRICT_COLUMN).is_err() {
        return Ok(None);
    }

    let mut projection = vec![col(DISTRICT_COLUMN)];
    if df.column(DEPARTMENT_COLUMN).is_ok() {
        projection.push(col(DEPARTMENT_COLUMN));
    }

    let lookup = df
        .clone()
        .lazy()
        .select(projection)
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(Some(lookup))
}
