use super::sample_df;
use crate::dashboard::logic::filter::{apply_cascade, charting_table, level_options};
use crate::dashboard::logic::*;
use crate::error::DashboardError;
use anyhow::Result;

fn value(v: &str) -> LevelChoice {
    LevelChoice::Value(v.to_owned())
}

#[test]
fn test_region_options_keep_first_appearance_and_end_with_all() -> Result<()> {
    let df = sample_df()?;
    let options = level_options(&df, REGION_COLUMN)?;
    assert_eq!(
        options,
        vec![value("COSTA"), value("SIERRA"), value("SELVA"), LevelChoice::All]
    );
    Ok(())
}

#[test]
fn test_all_levels_concrete_leaves_single_values() -> Result<()> {
    let df = sample_df()?;
    let selection = FilterSelection::new(value("COSTA"), value("LIMA"), value("LIMA"), value("ATE"));
    let outcome = apply_cascade(&df, &selection)?;

    assert_eq!(outcome.table.height(), 1);
    for (level, choice) in selection.iter() {
        let values = distinct_values(&outcome.table, level.column())?;
        assert_eq!(values, vec![choice.to_string()], "level {level:?}");
    }
    assert_eq!(outcome.applied_levels().count(), 4);
    Ok(())
}

#[test]
fn test_unmatched_combination_yields_empty_table() -> Result<()> {
    let df = sample_df()?;
    let selection = FilterSelection::new(value("COSTA"), value("CUSCO"), value("CUSCO"), value("CUSCO"));
    let outcome = apply_cascade(&df, &selection)?;

    assert_eq!(outcome.table.height(), 0);
    assert!(distinct_values(&outcome.table, DISTRICT_COLUMN)?.is_empty());
    Ok(())
}

#[test]
fn test_department_options_follow_region() -> Result<()> {
    let df = sample_df()?;
    let selection = FilterSelection::new(
        value("SIERRA"),
        LevelChoice::All,
        LevelChoice::All,
        LevelChoice::All,
    );
    let outcome = apply_cascade(&df, &selection)?;

    assert_eq!(
        outcome.options(FilterLevel::Department),
        &[value("CUSCO"), LevelChoice::All]
    );
    assert_eq!(outcome.table.height(), 2);
    Ok(())
}

#[test]
fn test_all_stops_narrowing_for_lower_levels() -> Result<()> {
    let df = sample_df()?;
    let selection = FilterSelection::new(
        value("COSTA"),
        LevelChoice::All,
        value("PIURA"),
        LevelChoice::All,
    );
    let outcome = apply_cascade(&df, &selection)?;

    // Only the region narrowed; the province choice sits below an ALL.
    assert_eq!(outcome.table.height(), 3);
    assert!(outcome.is_applied(FilterLevel::Region));
    assert!(!outcome.is_applied(FilterLevel::Province));
    assert_eq!(
        outcome.options(FilterLevel::Province),
        &[value("LIMA"), value("CANETE"), value("PIURA"), LevelChoice::All]
    );
    Ok(())
}

#[test]
fn test_everything_all_returns_full_table() -> Result<()> {
    let df = sample_df()?;
    let outcome = apply_cascade(&df, &FilterSelection::default())?;
    assert_eq!(outcome.table.height(), df.height());
    assert_eq!(outcome.applied_levels().count(), 0);
    Ok(())
}

#[test]
fn test_reconcile_resets_stale_choices() -> Result<()> {
    let df = sample_df()?;
    let mut selection = FilterSelection::new(
        value("SIERRA"),
        value("LIMA"),
        LevelChoice::All,
        LevelChoice::All,
    );
    let outcome = apply_cascade(&df, &selection)?;

    assert!(selection.reconcile(&outcome));
    assert_eq!(selection.get(FilterLevel::Department), &LevelChoice::All);
    assert_eq!(selection.get(FilterLevel::Region), &value("SIERRA"));

    let outcome = apply_cascade(&df, &selection)?;
    assert!(!selection.reconcile(&outcome));
    Ok(())
}

#[test]
fn test_simple_mode_ignores_selection() -> Result<()> {
    let df = sample_df()?;
    let selection = FilterSelection::new(value("SELVA"), LevelChoice::All, LevelChoice::All, LevelChoice::All);

    assert_eq!(charting_table(&df, Mode::Simple, &selection)?.height(), 6);
    assert_eq!(charting_table(&df, Mode::Advanced, &selection)?.height(), 1);
    Ok(())
}

#[test]
fn test_missing_category_column_is_invalid() -> Result<()> {
    let df = sample_df()?.drop(PROVINCE_COLUMN)?;
    let err = apply_cascade(&df, &FilterSelection::default()).unwrap_err();
    assert!(
        matches!(err, DashboardError::InvalidColumn { ref column, .. } if column == PROVINCE_COLUMN),
        "unexpected error: {err}"
    );
    Ok(())
}
