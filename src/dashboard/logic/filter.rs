//! Cascading region → department → province → district filter.
//!
//! Each level offers the distinct values of its column in the table that
//! reaches it, plus `ALL`. A concrete value narrows the table handed to the
//! next level. The first `ALL` stops narrowing: every level below it sees the
//! table filtered only through the level above the `ALL`, and the charted
//! table is that same table.

use super::types::{FilterLevel, FilterSelection, LevelChoice, Mode};
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct LevelState {
    pub level: FilterLevel,
    /// Distinct values followed by [`LevelChoice::All`].
    pub options: Vec<LevelChoice>,
    /// Whether this level's choice narrowed the table.
    pub applied: bool,
}

#[derive(Clone, Debug)]
pub struct CascadeOutcome {
    pub table: DataFrame,
    pub levels: Vec<LevelState>,
}

impl CascadeOutcome {
    pub fn options(&self, level: FilterLevel) -> &[LevelChoice] {
        self.levels
            .iter()
            .find(|state| state.level == level)
            .map(|state| state.options.as_slice())
            .unwrap_or_default()
    }

    pub fn is_applied(&self, level: FilterLevel) -> bool {
        self.levels
            .iter()
            .any(|state| state.level == level && state.applied)
    }

    /// Levels that narrowed the table, in cascade order.
    pub fn applied_levels(&self) -> impl Iterator<Item = FilterLevel> + '_ {
        self.levels
            .iter()
            .filter(|state| state.applied)
            .map(|state| state.level)
    }
}

/// Looks up `name`.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] when the column does not exist.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|err| DashboardError::invalid_column(name, err.to_string()))
}

/// Distinct non-null values of `column` rendered as text, in order of first
/// appearance.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let text = require_column(df, column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = text.str()?;

    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for value in ca.into_iter().flatten() {
        if seen.insert(value) {
            values.push(value.to_owned());
        }
    }
    Ok(values)
}

pub fn level_options(df: &DataFrame, column: &str) -> Result<Vec<LevelChoice>> {
    let mut options: Vec<LevelChoice> = distinct_values(df, column)?
        .into_iter()
        .map(LevelChoice::Value)
        .collect();
    options.push(LevelChoice::All);
    Ok(options)
}

/// Rows where `column` rendered as text equals `value`; `None` selects the
/// null rows.
pub fn filter_equals(df: &DataFrame, column: &str, value: Option<&str>) -> Result<DataFrame> {
    require_column(df, column)?;
    let predicate = match value {
        Some(v) => col(column).cast(DataType::String).eq(lit(v)),
        None => col(column).is_null(),
    };
    Ok(df.clone().lazy().filter(predicate).collect()?)
}

/// Narrows `df` level by level, outermost first.
///
/// Each level's options come from the table as narrowed by the levels above
/// it. The first `ALL` stops narrowing: deeper concrete choices are kept in
/// the selection but not applied.
///
/// # Errors
///
/// [`DashboardError::InvalidColumn`] when one of the four level columns is
/// missing.
pub fn apply_cascade(df: &DataFrame, selection: &FilterSelection) -> Result<CascadeOutcome> {
    let mut table = df.clone();
    let mut narrowing = true;
    let mut levels = Vec::with_capacity(FilterLevel::ORDER.len());

    for (level, choice) in selection.iter() {
        let options = level_options(&table, level.column())?;
        let applied = match choice.value() {
            Some(value) if narrowing => {
                table = filter_equals(&table, level.column(), Some(value))?;
                true
            }
            Some(_) => false,
            None => {
                narrowing = false;
                false
            }
        };
        levels.push(LevelState {
            level,
            options,
            applied,
        });
    }

    tracing::debug!(
        rows = table.height(),
        applied = levels.iter().filter(|l| l.applied).count(),
        "Cascade applied"
    );

    Ok(CascadeOutcome { table, levels })
}

/// The table a chart is drawn from: the whole dataset in Simple mode, the
/// cascaded one in Advanced mode.
///
/// # Errors
///
/// Same as [`apply_cascade`].
pub fn charting_table(df: &DataFrame, mode: Mode, selection: &FilterSelection) -> Result<DataFrame> {
    match mode {
        Mode::Simple => Ok(df.clone()),
        Mode::Advanced => Ok(apply_cascade(df, selection)?.table),
    }
}

impl FilterSelection {
    /// Resets to `ALL` every choice that is not among its level's options.
    /// Returns whether anything changed.
    pub fn reconcile(&mut self, outcome: &CascadeOutcome) -> bool {
        let mut changed = false;
        for level in FilterLevel::ORDER {
            let options = outcome.options(level);
            let choice = self.get_mut(level);
            if !choice.is_all() && !options.contains(choice) {
                *choice = LevelChoice::All;
                changed = true;
            }
        }
        changed
    }
}
