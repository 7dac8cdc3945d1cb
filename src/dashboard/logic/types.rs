use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Option offered at every cascade level meaning "do not filter here".
pub const ALL_SENTINEL: &str = "ALL";

pub const REGION_COLUMN: &str = "REG_NAT";
pub const DEPARTMENT_COLUMN: &str = "DEPARTAMENTO";
pub const PROVINCE_COLUMN: &str = "PROVINCIA";
pub const DISTRICT_COLUMN: &str = "DISTRITO";

/// Label used for the bucket of null cells in value counts.
pub const NULL_LABEL: &str = "(vacío)";

// DATASET

/// The loaded table plus the file it came from. Never mutated after loading;
/// filters produce new frames.
#[derive(Clone, Debug)]
pub struct Dataset {
    df: DataFrame,
    source: PathBuf,
}

impl Dataset {
    pub fn new(df: DataFrame, source: PathBuf) -> Self {
        Self { df, source }
    }

    pub fn df(&self) -> &DataFrame {
        &self.df
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Encoding {
    #[default]
    Latin1,
    Utf8,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latin1 => write!(f, "latin1"),
            Self::Utf8 => write!(f, "utf-8"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub separator: u8,
    pub encoding: Encoding,
    pub infer_schema_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b';',
            encoding: Encoding::Latin1,
            infer_schema_rows: 10_000,
        }
    }
}

/// Half-open range of column positions offered for charting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl Default for ColumnRange {
    fn default() -> Self {
        Self { start: 7, end: 14 }
    }
}

// CASCADING FILTER

/// The four nested administrative levels, outermost first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterLevel {
    Region,
    Department,
    Province,
    District,
}

impl FilterLevel {
    pub const ORDER: [Self; 4] = [
        Self::Region,
        Self::Department,
        Self::Province,
        Self::District,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::Region => REGION_COLUMN,
            Self::Department => DEPARTMENT_COLUMN,
            Self::Province => PROVINCE_COLUMN,
            Self::District => DISTRICT_COLUMN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Region => "la region",
            Self::Department => "el departamento",
            Self::Province => "la provincia",
            Self::District => "el distrito",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LevelChoice {
    #[default]
    All,
    Value(String),
}

impl LevelChoice {
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for LevelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_SENTINEL}"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// One choice per [`FilterLevel`], outermost first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    choices: [LevelChoice; 4],
}

impl FilterSelection {
    pub fn new(
        region: LevelChoice,
        department: LevelChoice,
        province: LevelChoice,
        district: LevelChoice,
    ) -> Self {
        Self {
            choices: [region, department, province, district],
        }
    }

    pub fn get(&self, level: FilterLevel) -> &LevelChoice {
        let [region, department, province, district] = &self.choices;
        match level {
            FilterLevel::Region => region,
            FilterLevel::Department => department,
            FilterLevel::Province => province,
            FilterLevel::District => district,
        }
    }

    pub fn get_mut(&mut self, level: FilterLevel) -> &mut LevelChoice {
        let [region, department, province, district] = &mut self.choices;
        match level {
            FilterLevel::Region => region,
            FilterLevel::Department => department,
            FilterLevel::Province => province,
            FilterLevel::District => district,
        }
    }

    pub fn set(&mut self, level: FilterLevel, choice: LevelChoice) {
        *self.get_mut(level) = choice;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterLevel, &LevelChoice)> {
        FilterLevel::ORDER.into_iter().map(|level| (level, self.get(level)))
    }
}

// CHARTS

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    Simple,
    Advanced,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Simple, Self::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Advanced => "Avanzado",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartKind {
    #[default]
    Pie,
    Bar,
    Histogram,
}

impl ChartKind {
    pub const ALL: [Self; 3] = [Self::Pie, Self::Bar, Self::Histogram];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pie => "Circular",
            Self::Bar => "Barras",
            Self::Histogram => "Histograma",
        }
    }
}

/// Everything needed to rebuild a chart from the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub column: String,
    pub mode: Mode,
    pub selection: FilterSelection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueCount {
    /// `None` is the bucket of null cells.
    pub value: Option<String>,
    pub count: usize,
}

impl ValueCount {
    pub fn label(&self) -> &str {
        self.value.as_deref().unwrap_or(NULL_LABEL)
    }
}

/// Frequencies over log-spaced bins. `edges.len() == counts.len() + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct LogHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl LogHistogram {
    /// `(lower, upper, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .filter_map(|(pair, &count)| match pair {
                [lo, hi] => Some((*lo, *hi, count)),
                _ => None,
            })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    Pie(Vec<ValueCount>),
    Bar(Vec<ValueCount>),
    Histogram(LogHistogram),
}

// SUMMARY

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ColumnDescription {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct StatsTable {
    pub columns: Vec<ColumnDescription>,
}

impl StatsTable {
    pub const ROW_LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl ColumnDescription {
    /// Values in the order of [`StatsTable::ROW_LABELS`].
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}
