//! Widget state of the dashboard and the data derived from it.
//!
//! Derived values (cascade outcome, chart data, drill-down rows) are cached
//! together with the exact input they were computed from and rebuilt as soon
//! as that input differs, so they can never drift from the dataset.

use super::logic::filter::{CascadeOutcome, apply_cascade, charting_table};
use super::logic::{
    ChartData, ChartKind, ChartRequest, ColumnRange, Dataset, FilterLevel, FilterSelection,
    LevelChoice, LoadOptions, Mode, StatsTable, build_chart, chart_columns, district_lookup,
    drill_down, load_dataset, summarize,
};
use crate::error::{DashboardError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Choices worth restoring on the next start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPrefs {
    pub mode: Mode,
    pub chart_kind: ChartKind,
}

#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub request: ChartRequest,
    /// The table the chart was drawn from (filtered in Advanced mode).
    pub table: Option<DataFrame>,
    pub data: std::result::Result<ChartData, String>,
}

impl RenderedChart {
    pub fn build(dataset: &Dataset, request: ChartRequest) -> Self {
        let result = charting_table(dataset.df(), request.mode, &request.selection).and_then(
            |table| build_chart(&table, &request.column, request.kind).map(|data| (table, data)),
        );
        match result {
            Ok((table, data)) => Self {
                request,
                table: Some(table),
                data: Ok(data),
            },
            Err(err) => {
                tracing::warn!(column = %request.column, "Chart could not be built: {err}");
                Self {
                    request,
                    table: None,
                    data: Err(err.to_string()),
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct DetailView {
    /// `None` is the bucket of null cells.
    pub value: Option<String>,
    pub rows: std::result::Result<DataFrame, String>,
    pub districts: Option<DataFrame>,
}

impl DetailView {
    pub fn build(table: &DataFrame, column: &str, value: Option<String>) -> Self {
        match drill_down(table, column, value.as_deref()) {
            Ok(rows) => {
                let districts = district_lookup(&rows).unwrap_or_else(|err| {
                    tracing::warn!("District lookup failed: {err}");
                    None
                });
                Self {
                    value,
                    rows: Ok(rows),
                    districts,
                }
            }
            Err(err) => Self {
                value,
                rows: Err(err.to_string()),
                districts: None,
            },
        }
    }
}

#[derive(Default)]
pub struct DashboardModel {
    pub dataset: Option<Arc<Dataset>>,
    /// Set only by fatal errors; nothing that needs the table is drawn.
    pub load_error: Option<String>,
    pub notice: Option<String>,
    pub summary: Option<std::result::Result<StatsTable, String>>,
    pub chart_range: ColumnRange,
    pub prefs: ViewPrefs,
    pub selection: FilterSelection,
    pub chart_column: Option<String>,
    pub chart: Option<RenderedChart>,
    pub detail: Option<DetailView>,
    cascade: Option<(FilterSelection, CascadeOutcome)>,
}

impl DashboardModel {
    pub fn new(chart_range: ColumnRange, prefs: ViewPrefs) -> Self {
        Self {
            chart_range,
            prefs,
            ..Default::default()
        }
    }

    /// Replaces the dataset. On a fatal failure every derived value is
    /// dropped so nothing stale is drawn.
    ///
    /// # Errors
    ///
    /// Returns the load error after recording it with [`Self::record_failure`].
    pub fn load(&mut self, path: &Path, options: &LoadOptions) -> Result<()> {
        self.chart = None;
        self.detail = None;
        self.cascade = None;
        self.selection = FilterSelection::default();

        match load_dataset(path, options) {
            Ok(dataset) => {
                self.notice = None;
                self.summary = Some(summarize(dataset.df()).map_err(|err| err.to_string()));
                self.chart_column = chart_columns(dataset.df(), self.chart_range)
                    .into_iter()
                    .next();
                self.dataset = Some(Arc::new(dataset));
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "Dataset load failed: {err}");
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// A fatal error drops the table and everything derived from it. Any
    /// other error is kept as a notice above the current table.
    pub fn record_failure(&mut self, err: &DashboardError) {
        if err.is_fatal() {
            self.dataset = None;
            self.summary = None;
            self.chart_column = None;
            self.load_error = Some(err.to_string());
            self.notice = None;
        } else {
            self.notice = Some(err.to_string());
        }
    }

    pub fn chart_columns(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|ds| chart_columns(ds.df(), self.chart_range))
            .unwrap_or_default()
    }

    /// Cascade for the current selection. Choices that stopped being offered
    /// after a higher level changed are reset to `ALL` first.
    pub fn cascade(&mut self) -> Option<std::result::Result<&CascadeOutcome, String>> {
        let dataset = Arc::clone(self.dataset.as_ref()?);

        let cached = self
            .cascade
            .as_ref()
            .is_some_and(|(selection, _)| *selection == self.selection);
        if !cached {
            // Each pass can only reset levels, so four passes always settle.
            for _ in FilterLevel::ORDER {
                let outcome = match apply_cascade(dataset.df(), &self.selection) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        self.cascade = None;
                        return Some(Err(err.to_string()));
                    }
                };
                let changed = self.selection.reconcile(&outcome);
                self.cascade = Some((self.selection.clone(), outcome));
                if !changed {
                    break;
                }
            }
        }

        self.cascade.as_ref().map(|(_, outcome)| Ok(outcome))
    }

    pub fn set_level(&mut self, level: FilterLevel, choice: LevelChoice) {
        if self.selection.get(level) != &choice {
            tracing::debug!(?level, %choice, "Filter level changed");
            self.selection.set(level, choice);
        }
    }

    pub fn current_request(&self) -> Option<ChartRequest> {
        Some(ChartRequest {
            kind: self.prefs.chart_kind,
            column: self.chart_column.clone()?,
            mode: self.prefs.mode,
            selection: self.selection.clone(),
        })
    }

    /// Handler for "Generar gráfico".
    pub fn generate_chart(&mut self) {
        let (Some(dataset), Some(request)) = (self.dataset.clone(), self.current_request()) else {
            return;
        };
        if self.chart.as_ref().is_some_and(|c| c.request == request) {
            return;
        }
        tracing::info!(
            column = %request.column,
            kind = ?request.kind,
            mode = ?request.mode,
            "Generating chart"
        );
        self.chart = Some(RenderedChart::build(&dataset, request));
        self.detail = None;
    }

    /// Handler for the post-chart detail selector.
    pub fn select_detail(&mut self, value: Option<String>) {
        if self.detail.as_ref().is_some_and(|d| d.value == value) {
            return;
        }
        let Some(chart) = &self.chart else {
            return;
        };
        let Some(table) = &chart.table else {
            return;
        };
        self.detail = Some(DetailView::build(table, &chart.request.column, value));
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use crate::dashboard::logic::ValueCount;

    fn write_fixture(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("residuos_model_{}_{name}", std::process::id()));
        let mut text = String::from("N;F;U;REG_NAT;DEPARTAMENTO;PROVINCIA;DISTRITO;RESIDUOS\n");
        for (i, (region, residuos)) in [
            ("COSTA", 120),
            ("COSTA", 120),
            ("SIERRA", 120),
            ("SIERRA", 80),
        ]
        .iter()
        .enumerate()
        {
            text.push_str(&format!("{i};2024;0;{region};LIMA;LIMA;ATE;{residuos}\n"));
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_load_selects_first_chart_column() {
        let path = write_fixture("load.csv");
        let mut model = DashboardModel::new(ColumnRange::default(), ViewPrefs::default());
        model.load(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(model.chart_columns(), vec!["RESIDUOS"]);
        assert_eq!(model.chart_column.as_deref(), Some("RESIDUOS"));
        assert!(model.summary.as_ref().unwrap().is_ok());
    }

    #[test]
    fn test_failed_load_clears_dataset() {
        let path = write_fixture("reload.csv");
        let mut model = DashboardModel::new(ColumnRange::default(), ViewPrefs::default());
        model.load(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(model.load(&path, &LoadOptions::default()).is_err());
        assert!(model.dataset.is_none());
        assert!(model.summary.is_none());
        assert!(model.load_error.is_some());
    }

    #[test]
    fn test_non_fatal_failure_keeps_table() {
        let path = write_fixture("notice.csv");
        let mut model = DashboardModel::new(ColumnRange::default(), ViewPrefs::default());
        model.load(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        model.record_failure(&DashboardError::Config("separador".to_owned()));
        assert!(model.dataset.is_some());
        assert!(model.load_error.is_none());
        assert!(model.notice.as_deref().unwrap().contains("separador"));

        model.record_failure(&DashboardError::Load("roto".to_owned()));
        assert!(model.dataset.is_none());
        assert!(model.notice.is_none());
        assert!(model.load_error.as_deref().unwrap().contains("roto"));
    }

    #[test]
    fn test_advanced_bar_chart_uses_filtered_table() {
        let path = write_fixture("advanced.csv");
        let mut model = DashboardModel::new(
            ColumnRange::default(),
            ViewPrefs {
                mode: Mode::Advanced,
                chart_kind: ChartKind::Bar,
            },
        );
        model.load(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        model.set_level(FilterLevel::Region, LevelChoice::Value("SIERRA".to_owned()));
        assert!(model.cascade().unwrap().is_ok());
        model.generate_chart();

        let chart = model.chart.as_ref().unwrap();
        let Ok(ChartData::Bar(bars)) = &chart.data else {
            panic!("expected bar data");
        };
        assert_eq!(bars.iter().map(|b| b.count).sum::<usize>(), 2);

        model.select_detail(bars.first().and_then(|b: &ValueCount| b.value.clone()));
        let detail = model.detail.as_ref().unwrap();
        assert_eq!(detail.rows.as_ref().unwrap().height(), 1);
        assert_eq!(detail.districts.as_ref().unwrap().height(), 1);
    }

    #[test]
    fn test_stale_level_is_reset_by_cascade() {
        let path = write_fixture("stale.csv");
        let mut model = DashboardModel::new(ColumnRange::default(), ViewPrefs::default());
        model.load(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        model.set_level(FilterLevel::Region, LevelChoice::Value("COSTA".to_owned()));
        model.set_level(FilterLevel::Department, LevelChoice::Value("CUSCO".to_owned()));
        assert!(model.cascade().unwrap().is_ok());
        assert_eq!(model.selection.get(FilterLevel::Department), &LevelChoice::All);
    }
}
