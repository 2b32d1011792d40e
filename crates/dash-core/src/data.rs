// File: crates/dash-core/src/data.rs
// Summary: Typed dashboard datasets and the directory loader that produces them.
// Notes:
// - The three per-state arrays (deaths, income, unemployment) are zipped by position
//   everywhere, so loading rejects inputs whose ids are not aligned.
// - Numeric and year fields accept JSON numbers or numeric strings.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::format;
use crate::hierarchy::{Hierarchy, HierarchyError, TreeRecord};

pub const STATE_SHAPES_FILE: &str = "state_shapes.json";
pub const STATE_DEATHS_FILE: &str = "state_deaths.json";
pub const STATE_INCOME_FILE: &str = "state_income.json";
pub const STATE_UNEMPLOYMENT_FILE: &str = "state_unemployment.json";
pub const DRUG_HIERARCHY_FILE: &str = "drug_hierarchy.json";
pub const DRUG_SERIES_FILE: &str = "drug_series.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{file}: unparseable date '{value}'")]
    Date { file: String, value: String },
    #[error("{file}: field '{field}' is not a number ('{value}')")]
    Number { file: String, field: String, value: String },
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error("state arrays are not aligned at index {index}: deaths '{deaths}', {other_file} '{other}'")]
    Misaligned { index: usize, deaths: String, other_file: String, other: String },
    #[error("{0} contains no records")]
    Empty(String),
}

/// Dimension plotted against the death rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    DeathRate,
    MedianIncome,
    Unemployment,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::DeathRate, Factor::MedianIncome, Factor::Unemployment];

    pub fn key(self) -> &'static str {
        match self {
            Factor::DeathRate => "death_rate",
            Factor::MedianIncome => "median_income",
            Factor::Unemployment => "unemployment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Factor::DeathRate => "Deaths Per 100,000",
            Factor::MedianIncome => "Median Income (1000s)",
            Factor::Unemployment => "Unemployment Rate",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Factor::DeathRate => "Death Rate",
            Factor::MedianIncome => "Median Income",
            Factor::Unemployment => "Unemployment Rate",
        }
    }

    /// Tick and tooltip formatter for values of this factor.
    pub fn format(self, v: f64) -> String {
        match self {
            Factor::DeathRate => format::identity(v),
            Factor::MedianIncome => format::currency(v),
            Factor::Unemployment => format::percent(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateYears<R> {
    pub id: String,
    pub years: Vec<R>,
}

impl<R> StateYears<R> {
    pub fn new(id: impl Into<String>, years: Vec<R>) -> Self {
        Self { id: id.into(), years }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathRecord {
    pub year: i32,
    pub death_rate: f64,
    pub deaths: f64,
    pub population: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncomeRecord {
    pub year: i32,
    pub median_income: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnemploymentRecord {
    pub year: i32,
    pub unemployment: f64,
}

/// Outline of a state as `[lon, lat]` points.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StateShape {
    pub id: String,
    pub outline: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrugRow {
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

/// Treatment admissions per substance over time; `values[i]` belongs to `substances[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrugSeries {
    pub substances: Vec<String>,
    pub rows: Vec<DrugRow>,
}

impl DrugSeries {
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.iter().map(|r| r.date).min()?;
        let last = self.rows.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

/// Everything the dashboard draws from. Cheap to clone; views share the slices.
#[derive(Clone, Debug)]
pub struct Datasets {
    pub shapes: Rc<[StateShape]>,
    pub deaths: Rc<[StateYears<DeathRecord>]>,
    pub income: Rc<[StateYears<IncomeRecord>]>,
    pub unemployment: Rc<[StateYears<UnemploymentRecord>]>,
    pub tree: Rc<Hierarchy>,
    pub drugs: Rc<DrugSeries>,
}

impl Datasets {
    /// Assemble and validate. Shapes are sorted by id.
    pub fn new(
        mut shapes: Vec<StateShape>,
        deaths: Vec<StateYears<DeathRecord>>,
        income: Vec<StateYears<IncomeRecord>>,
        unemployment: Vec<StateYears<UnemploymentRecord>>,
        tree: Hierarchy,
        drugs: DrugSeries,
    ) -> Result<Self, LoadError> {
        shapes.sort_by(|a, b| a.id.cmp(&b.id));
        let out = Self {
            shapes: shapes.into(),
            deaths: deaths.into(),
            income: income.into(),
            unemployment: unemployment.into(),
            tree: Rc::new(tree),
            drugs: Rc::new(drugs),
        };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.deaths.is_empty() {
            return Err(LoadError::Empty(STATE_DEATHS_FILE.to_string()));
        }
        let check = |file: &str, ids: Vec<&str>| -> Result<(), LoadError> {
            if ids.len() != self.deaths.len() {
                let index = ids.len().min(self.deaths.len());
                return Err(LoadError::Misaligned {
                    index,
                    deaths: self.deaths.get(index).map(|s| s.id.clone()).unwrap_or_default(),
                    other_file: file.to_string(),
                    other: ids.get(index).map(|s| s.to_string()).unwrap_or_default(),
                });
            }
            for (index, (d, o)) in self.deaths.iter().zip(ids).enumerate() {
                if d.id != o {
                    return Err(LoadError::Misaligned {
                        index,
                        deaths: d.id.clone(),
                        other_file: file.to_string(),
                        other: o.to_string(),
                    });
                }
            }
            Ok(())
        };
        check(STATE_INCOME_FILE, self.income.iter().map(|s| s.id.as_str()).collect())?;
        check(STATE_UNEMPLOYMENT_FILE, self.unemployment.iter().map(|s| s.id.as_str()).collect())?;
        Ok(())
    }

    pub fn state_count(&self) -> usize {
        self.deaths.len()
    }

    /// Value of `factor` for the state at `index` in `year`, if that year is present.
    pub fn factor_value(&self, factor: Factor, index: usize, year: i32) -> Option<f64> {
        match factor {
            Factor::DeathRate => {
                self.deaths.get(index)?.years.iter().find(|r| r.year == year).map(|r| r.death_rate)
            }
            Factor::MedianIncome => {
                self.income.get(index)?.years.iter().find(|r| r.year == year).map(|r| r.median_income)
            }
            Factor::Unemployment => {
                self.unemployment.get(index)?.years.iter().find(|r| r.year == year).map(|r| r.unemployment)
            }
        }
    }

    /// Smallest and largest value of `factor` over every state and year.
    pub fn factor_extent(&self, factor: Factor) -> (f64, f64) {
        let values: Vec<f64> = match factor {
            Factor::DeathRate => self.deaths.iter().flat_map(|s| s.years.iter().map(|r| r.death_rate)).collect(),
            Factor::MedianIncome => self.income.iter().flat_map(|s| s.years.iter().map(|r| r.median_income)).collect(),
            Factor::Unemployment => {
                self.unemployment.iter().flat_map(|s| s.years.iter().map(|r| r.unemployment)).collect()
            }
        };
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo.is_finite() && hi.is_finite() { (lo, hi) } else { (0.0, 1.0) }
    }
}

/// Load every dataset from `dir`. Any failure aborts the whole load.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Datasets, LoadError> {
    let dir = dir.as_ref();
    let shapes: Vec<StateShape> = read_json(&dir.join(STATE_SHAPES_FILE))?;
    let deaths = parse_states(STATE_DEATHS_FILE, read_json(&dir.join(STATE_DEATHS_FILE))?, |file, row| {
        Ok(DeathRecord {
            year: year_field(file, row)?,
            death_rate: number_field(file, row, "death_rate")?,
            deaths: optional_number_field(file, row, "deaths")?,
            population: optional_number_field(file, row, "population")?,
        })
    })?;
    let income = parse_states(STATE_INCOME_FILE, read_json(&dir.join(STATE_INCOME_FILE))?, |file, row| {
        Ok(IncomeRecord { year: year_field(file, row)?, median_income: number_field(file, row, "median_income")? })
    })?;
    let unemployment =
        parse_states(STATE_UNEMPLOYMENT_FILE, read_json(&dir.join(STATE_UNEMPLOYMENT_FILE))?, |file, row| {
            Ok(UnemploymentRecord {
                year: year_field(file, row)?,
                unemployment: number_field(file, row, "unemployment")?,
            })
        })?;
    let record: TreeRecord = read_json(&dir.join(DRUG_HIERARCHY_FILE))?;
    let tree = Hierarchy::from_record(record)?;
    let drugs = load_drug_series(&dir.join(DRUG_SERIES_FILE))?;

    let data = Datasets::new(shapes, deaths, income, unemployment, tree, drugs)?;
    log::info!(
        "loaded {} states, {} shapes, {} hierarchy nodes, {} drug rows from {}",
        data.state_count(),
        data.shapes.len(),
        data.tree.len(),
        data.drugs.rows.len(),
        dir.display()
    );
    Ok(data)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json { path: path.to_path_buf(), source })
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self, file: &str, field: &str) -> Result<f64, LoadError> {
        match self {
            Numeric::Number(v) => Ok(*v),
            Numeric::Text(s) => s.trim().parse::<f64>().map_err(|_| LoadError::Number {
                file: file.to_string(),
                field: field.to_string(),
                value: s.clone(),
            }),
        }
    }
}

type RawRow = HashMap<String, Numeric>;

#[derive(Deserialize)]
struct RawState {
    id: String,
    #[serde(default)]
    years: Vec<RawRow>,
}

fn parse_states<R, F>(file: &str, raw: Vec<RawState>, parse: F) -> Result<Vec<StateYears<R>>, LoadError>
where
    F: Fn(&str, &RawRow) -> Result<R, LoadError>,
{
    raw.into_iter()
        .map(|state| {
            let years = state.years.iter().map(|row| parse(file, row)).collect::<Result<Vec<_>, _>>()?;
            Ok(StateYears { id: state.id, years })
        })
        .collect()
}

fn number_field(file: &str, row: &RawRow, field: &str) -> Result<f64, LoadError> {
    match row.get(field) {
        Some(v) => v.to_f64(file, field),
        None => Err(LoadError::Number { file: file.to_string(), field: field.to_string(), value: String::new() }),
    }
}

fn optional_number_field(file: &str, row: &RawRow, field: &str) -> Result<f64, LoadError> {
    row.get(field).map_or(Ok(0.0), |v| v.to_f64(file, field))
}

fn year_field(file: &str, row: &RawRow) -> Result<i32, LoadError> {
    let raw = number_field(file, row, "year")?;
    if raw.fract() != 0.0 || raw.abs() > 1.0e6 {
        return Err(LoadError::Number { file: file.to_string(), field: "year".into(), value: raw.to_string() });
    }
    Ok(raw as i32)
}

/// Accepts `%Y-%m-%d` or a bare year (taken as January 1st).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    s.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
}

/// Year of a drug-series row, for tables and axis labels.
pub fn row_year(row: &DrugRow) -> i32 {
    row.date.year()
}

fn load_drug_series(path: &Path) -> Result<DrugSeries, LoadError> {
    let csv_err = |source| LoadError::Csv { path: path.to_path_buf(), source };
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).map_err(csv_err)?;
    let headers: Vec<String> = rdr.headers().map_err(csv_err)?.iter().map(|h| h.trim().to_string()).collect();
    let date_col = headers.iter().position(|h| h.eq_ignore_ascii_case("date")).unwrap_or(0);
    let substances: Vec<String> =
        headers.iter().enumerate().filter(|(i, _)| *i != date_col).map(|(_, h)| h.clone()).collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(csv_err)?;
        let raw_date = rec.get(date_col).unwrap_or_default();
        let date = parse_date(raw_date)
            .ok_or_else(|| LoadError::Date { file: DRUG_SERIES_FILE.to_string(), value: raw_date.to_string() })?;
        let mut values = Vec::with_capacity(substances.len());
        for (i, header) in headers.iter().enumerate() {
            if i == date_col {
                continue;
            }
            let cell = rec.get(i).unwrap_or_default().trim();
            let v = if cell.is_empty() {
                0.0
            } else {
                cell.parse::<f64>().map_err(|_| LoadError::Number {
                    file: DRUG_SERIES_FILE.to_string(),
                    field: header.clone(),
                    value: cell.to_string(),
                })?
            };
            values.push(v);
        }
        rows.push(DrugRow { date, values });
    }
    if rows.is_empty() {
        return Err(LoadError::Empty(DRUG_SERIES_FILE.to_string()));
    }
    rows.sort_by_key(|r| r.date);
    Ok(DrugSeries { substances, rows })
}
