use super::sample_df;
use crate::dashboard::logic::*;
use anyhow::Result;
use polars::prelude::*;

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

#[test]
fn test_summary_covers_numeric_columns_only() -> Result<()> {
    let df = sample_df()?;
    let stats = summarize(&df)?;
    let names: Vec<&str> = stats.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["QRESIDUOS_MUN", "PERIODO"]);
    Ok(())
}

#[test]
fn test_describe_matches_reference_values() -> Result<()> {
    let df = df!("Q" => &[1.0, 2.0, 3.0, 4.0])?;
    let stats = summarize(&df)?;
    let q = stats.column("Q").expect("Q described");

    assert_eq!(q.count, 4);
    assert!(close(q.mean, 2.5));
    assert!(close(q.std, 1.290_994_448_735_805_6));
    assert!(close(q.min, 1.0));
    assert!(close(q.q25, 1.75));
    assert!(close(q.q50, 2.5));
    assert!(close(q.q75, 3.25));
    assert!(close(q.max, 4.0));
    Ok(())
}

#[test]
fn test_count_skips_nulls() -> Result<()> {
    let s = Series::new("Q".into(), vec![Some(10i64), None, Some(30)]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    let stats = summarize(&df)?;
    let q = stats.column("Q").expect("Q described");

    assert_eq!(q.count, 2);
    assert!(close(q.mean, 20.0));
    assert_eq!(q.values()[0], Some(2.0));
    Ok(())
}

#[test]
fn test_text_only_table_has_empty_summary() -> Result<()> {
    let df = df!("DISTRITO" => &["ATE", "ASIA"])?;
    assert!(summarize(&df)?.is_empty());
    Ok(())
}
