//! Year-aligned comparison of two independently derived real revenue series

use super::series::{
    DerivedSeries, InflationRateRecord, ReconciliationRow, ReconciliationSummary,
    ReconstructedSeries,
};

/// Real revenue and cumulative inflation of one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealPoint {
    pub year: i32,
    pub real: f64,
    pub cumulative_inflation_pct: f64,
}

/// A series that can take part in a reconciliation
pub trait RealSeries {
    fn real_points(&self) -> Vec<RealPoint>;
}

impl RealSeries for DerivedSeries {
    fn real_points(&self) -> Vec<RealPoint> {
        self.points
            .iter()
            .map(|p| RealPoint {
                year: p.year,
                real: p.real,
                cumulative_inflation_pct: p.cumulative_inflation_pct,
            })
            .collect()
    }
}

impl RealSeries for ReconstructedSeries {
    fn real_points(&self) -> Vec<RealPoint> {
        self.points
            .iter()
            .map(|p| RealPoint {
                year: p.year,
                real: p.real_revenue_reconstructed,
                cumulative_inflation_pct: p.cumulative_inflation_pct,
            })
            .collect()
    }
}

/// Inner join of `a` and `b` on year, differences taken as `b - a`.
///
/// Years present on one side only are dropped. Rows are ordered by year.
pub fn reconcile<A, B>(a: &A, b: &B) -> Vec<ReconciliationRow>
where
    A: RealSeries,
    B: RealSeries,
{
    let b_points = b.real_points();
    let mut rows: Vec<_> = a
        .real_points()
        .into_iter()
        .filter_map(|pa| {
            b_points
                .iter()
                .find(|pb| pb.year == pa.year)
                .map(|pb| ReconciliationRow {
                    year: pa.year,
                    real_a: pa.real,
                    real_b: pb.real,
                    real_diff: pb.real - pa.real,
                    cum_inflation_a: pa.cumulative_inflation_pct,
                    cum_inflation_b: pb.cumulative_inflation_pct,
                    cum_inflation_diff: pb.cumulative_inflation_pct - pa.cumulative_inflation_pct,
                })
        })
        .collect();
    rows.sort_by_key(|r| r.year);
    rows
}

/// Headline figures: the final-year cumulative inflation gap and the mean raw rate of `b`.
pub fn summarize(
    rows: &[ReconciliationRow],
    rates: &[InflationRateRecord],
) -> ReconciliationSummary {
    let last = rows.iter().max_by_key(|r| r.year);
    let mean_annual_rate_b = if rates.is_empty() {
        None
    } else {
        let total: f64 = rates.iter().map(|r| r.rate).sum();
        Some(total / rates.len() as f64 * 100.0)
    };

    ReconciliationSummary {
        final_year: last.map(|r| r.year),
        final_cum_inflation_a: last.map(|r| r.cum_inflation_a),
        final_cum_inflation_b: last.map(|r| r.cum_inflation_b),
        final_year_diff_pct: last.map(|r| r.cum_inflation_diff),
        mean_annual_rate_b,
    }
}
