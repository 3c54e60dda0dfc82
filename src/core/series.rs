use serde::{Deserialize, Serialize};

/// Nominal and real revenue for a single year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub nominal: f64,
    pub real: f64,
}

/// Nominal revenue for a single year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NominalRecord {
    pub year: i32,
    pub nominal: f64,
}

impl From<YearRecord> for NominalRecord {
    fn from(record: YearRecord) -> Self {
        NominalRecord {
            year: record.year,
            nominal: record.nominal,
        }
    }
}

impl From<&YearRecord> for NominalRecord {
    fn from(record: &YearRecord) -> Self {
        (*record).into()
    }
}

/// Annual inflation rate applied to reach `year` from the year before.
///
/// `rate` is fractional: 0.03 means 3%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationRateRecord {
    pub year: i32,
    pub rate: f64,
}

/// One year of an implicit price index derived from nominal/real revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedPoint {
    pub year: i32,
    pub nominal: f64,
    pub real: f64,
    /// Nominal over real revenue for this year
    pub price_ratio: f64,
    /// Price ratio relative to the base year's ratio
    pub price_index: f64,
    pub cumulative_inflation_pct: f64,
    /// Change against the previous year; `None` for the earliest year
    pub annual_inflation_pct: Option<f64>,
}

/// Implicit price index series, ordered by year
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub base_year: i32,
    pub points: Vec<DerivedPoint>,
}

impl DerivedSeries {
    pub fn get(&self, year: i32) -> Option<&DerivedPoint> {
        self.points.iter().find(|p| p.year == year)
    }
}

/// One year of a real revenue series rebuilt from chained inflation rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconstructedPoint {
    pub year: i32,
    pub nominal: f64,
    /// Rate applied to reach this year, `None` when no rate record covered it
    pub rate: Option<f64>,
    pub chained_price_index: f64,
    pub real_revenue_reconstructed: f64,
    pub cumulative_inflation_pct: f64,
}

/// Chained price index series, ordered by year
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedSeries {
    pub base_year: i32,
    pub points: Vec<ReconstructedPoint>,
}

impl ReconstructedSeries {
    pub fn get(&self, year: i32) -> Option<&ReconstructedPoint> {
        self.points.iter().find(|p| p.year == year)
    }

    /// Non-base years that fell back to the nominal revenue because no rate
    /// record was supplied for them.
    pub fn defaulted_years(&self) -> Vec<i32> {
        self.points
            .iter()
            .filter(|p| p.year != self.base_year && p.rate.is_none())
            .map(|p| p.year)
            .collect()
    }
}

/// Year-aligned comparison of two real revenue series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconciliationRow {
    pub year: i32,
    pub real_a: f64,
    pub real_b: f64,
    pub real_diff: f64,
    pub cum_inflation_a: f64,
    pub cum_inflation_b: f64,
    pub cum_inflation_diff: f64,
}

/// Headline figures of a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReconciliationSummary {
    /// Latest year present in both series
    pub final_year: Option<i32>,
    pub final_cum_inflation_a: Option<f64>,
    pub final_cum_inflation_b: Option<f64>,
    /// Cumulative inflation difference (b - a) at the final year, in percentage points
    pub final_year_diff_pct: Option<f64>,
    /// Arithmetic mean of the raw annual rates behind series b, as a percentage
    pub mean_annual_rate_b: Option<f64>,
}

/// Convert a price index into cumulative inflation since the base year, in percent.
pub fn cumulative_inflation_pct(price_index: f64) -> f64 {
    (price_index - 1.0) * 100.0
}
