use super::sample_df;
use crate::dashboard::logic::*;
use crate::error::DashboardError;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_value_counts_sum_to_row_count() -> Result<()> {
    let df = sample_df()?;
    let counts = value_counts(&df, REGION_COLUMN)?;

    let total: usize = counts.iter().map(|c| c.count).sum();
    assert_eq!(total, df.height());
    let labels: Vec<&str> = counts.iter().map(ValueCount::label).collect();
    assert_eq!(labels, vec!["COSTA", "SIERRA", "SELVA"]);
    Ok(())
}

#[test]
fn test_pie_counts_include_null_bucket() -> Result<()> {
    let s = Series::new("TIPO".into(), vec![Some("A"), None, Some("A"), None, Some("B")]);
    let df = DataFrame::new(vec![Column::from(s)])?;

    let ChartData::Pie(slices) = build_chart(&df, "TIPO", ChartKind::Pie)? else {
        panic!("Expected pie data");
    };
    assert_eq!(slices.iter().map(|s| s.count).sum::<usize>(), 5);
    assert_eq!(slices.len(), 3);
    assert_eq!(slices[0].value.as_deref(), Some("A"));
    // Ties sort the null bucket after named values.
    assert_eq!(slices[1].value, None);
    assert_eq!(slices[1].label(), NULL_LABEL);
    Ok(())
}

#[test]
fn test_bar_counts_over_numeric_column() -> Result<()> {
    let df = sample_df()?;
    let ChartData::Bar(bars) = build_chart(&df, "PERIODO", ChartKind::Bar)? else {
        panic!("Expected bar data");
    };
    assert_eq!(
        bars,
        vec![
            ValueCount {
                value: Some("2022".to_owned()),
                count: 4
            },
            ValueCount {
                value: Some("2023".to_owned()),
                count: 2
            },
        ]
    );
    Ok(())
}

#[test]
fn test_log_bin_edges_follow_formula() {
    for max in [2.0, 10.0, 120.5, 1000.0, 123_456.0] {
        let edges = log_bin_edges(max);
        assert_eq!(edges.len(), 10);
        for (i, edge) in edges.iter().enumerate() {
            let expected = 10f64.powf(i as f64 / 9.0 * max.log10());
            assert!(
                (edge - expected).abs() <= expected * 1e-9,
                "edge {i} for max {max}: {edge} vs {expected}"
            );
        }
        assert!(edges.windows(2).all(|w| w[0] < w[1]), "edges increase");
    }
}

#[test]
fn test_log_histogram_assigns_bins() -> Result<()> {
    let s = Series::new("Q".into(), vec![0.5, 1.0, 5.0, 15.0, 150.0, 1000.0]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    let hist = log_histogram(&df, "Q")?;

    assert_eq!(hist.edges.len(), 10);
    assert_eq!(hist.counts.len(), 9);
    // Edges are 10^(i/3): 1, 2.15, 4.64, 10, 21.5, 46.4, 100, 215, 464, 1000.
    assert_eq!(hist.counts, vec![1, 0, 1, 1, 0, 0, 1, 0, 1]);
    // 0.5 is below the first edge.
    assert_eq!(hist.total(), 5);
    assert_eq!(hist.bins().count(), 9);
    Ok(())
}

#[test]
fn test_histogram_rejects_text_column() -> Result<()> {
    let df = sample_df()?;
    let err = build_chart(&df, DISTRICT_COLUMN, ChartKind::Histogram).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidColumn { .. }), "got {err}");
    Ok(())
}

#[test]
fn test_histogram_rejects_non_positive_max() -> Result<()> {
    let s = Series::new("Q".into(), vec![-3.0, 0.0]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    assert!(matches!(
        log_histogram(&df, "Q"),
        Err(DashboardError::InvalidColumn { .. })
    ));

    let s = Series::new("Q".into(), vec![0.2, 1.0]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    assert!(matches!(
        log_histogram(&df, "Q"),
        Err(DashboardError::InvalidColumn { .. })
    ));
    Ok(())
}

#[test]
fn test_histogram_rejects_all_null_column() -> Result<()> {
    let s = Series::new("Q".into(), vec![None::<f64>, None]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    assert!(matches!(
        log_histogram(&df, "Q"),
        Err(DashboardError::InvalidColumn { .. })
    ));
    Ok(())
}

#[test]
fn test_unknown_column_is_invalid() -> Result<()> {
    let df = sample_df()?;
    for kind in ChartKind::ALL {
        assert!(matches!(
            build_chart(&df, "NO_EXISTE", kind),
            Err(DashboardError::InvalidColumn { .. })
        ));
    }
    Ok(())
}

#[test]
fn test_drill_down_returns_matching_rows_only() -> Result<()> {
    let df = sample_df()?;

    let rows = drill_down(&df, DEPARTMENT_COLUMN, Some("CUSCO"))?;
    assert_eq!(rows.height(), 2);
    assert_eq!(distinct_values(&rows, DEPARTMENT_COLUMN)?, vec!["CUSCO"]);

    let rows = drill_down(&df, "PERIODO", Some("2023"))?;
    assert_eq!(rows.height(), 2);

    let rows = drill_down(&df, DEPARTMENT_COLUMN, Some("TACNA"))?;
    assert_eq!(rows.height(), 0);
    assert_eq!(rows.width(), df.width());
    Ok(())
}

#[test]
fn test_drill_down_on_null_bucket() -> Result<()> {
    let s = Series::new("TIPO".into(), vec![Some("A"), None, Some("B"), None]);
    let df = DataFrame::new(vec![Column::from(s)])?;
    assert_eq!(drill_down(&df, "TIPO", None)?.height(), 2);
    Ok(())
}

#[test]
fn test_district_lookup_deduplicates_pairs() -> Result<()> {
    let df = df!(
        "DISTRITO" => &["ATE", "ATE", "ASIA", "ATE"],
        "DEPARTAMENTO" => &["LIMA", "LIMA", "LIMA", "LIMA"],
        "QRESIDUOS_MUN" => &[1.0, 2.0, 3.0, 4.0]
    )?;
    let lookup = district_lookup(&df)?.expect("DISTRITO present");

    assert_eq!(lookup.width(), 2);
    assert_eq!(lookup.height(), 2);
    assert_eq!(distinct_values(&lookup, DISTRICT_COLUMN)?, vec!["ATE", "ASIA"]);
    Ok(())
}

#[test]
fn test_district_lookup_without_district_column() -> Result<()> {
    let df = sample_df()?.drop(DISTRICT_COLUMN)?;
    assert!(district_lookup(&df)?.is_none());
    Ok(())
}

#[test]
fn test_chart_columns_are_clipped_to_width() -> Result<()> {
    let df = sample_df()?;
    let columns = chart_columns(&df, ColumnRange { start: 4, end: 14 });
    assert_eq!(columns, vec!["QRESIDUOS_MUN", "PERIODO"]);
    assert!(chart_columns(&df, ColumnRange::default()).is_empty());
    Ok(())
}
