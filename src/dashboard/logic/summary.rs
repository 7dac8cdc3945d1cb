use super::types::{ColumnDescription, StatsTable};
use crate::error::Result;
use polars::prelude::*;

/// Descriptive statistics for every numeric column, in table order.
///
/// Matches the usual `describe()` layout: non-null count, mean, sample
/// standard deviation (ddof = 1), min, linear-interpolated quartiles and max.
/// Non-numeric columns are skipped.
///
/// # Errors
///
/// Propagates Polars cast failures.
pub fn summarize(df: &DataFrame) -> Result<StatsTable> {
    let mut columns = Vec::new();

    for column in df.get_columns() {
        if !column.dtype().is_numeric() {
            continue;
        }
        columns.push(describe_column(column)?);
    }

    tracing::debug!(columns = columns.len(), "Summary computed");
    Ok(StatsTable { columns })
}

pub fn describe_column(column: &Column) -> Result<ColumnDescription> {
    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    let ca = series.f64()?;

    Ok(ColumnDescription {
        name: column.name().to_string(),
        count: ca.len() - ca.null_count(),
        mean: ca.mean(),
        std: ca.std(1),
        min: ca.min(),
        q25: ca.quantile(0.25, QuantileMethod::Linear).unwrap_or(None),
        q50: ca.quantile(0.5, QuantileMethod::Linear).unwrap_or(None),
        q75: ca.quantile(0.75, QuantileMethod::Linear).unwrap_or(None),
        max: ca.max(),
    })
}
