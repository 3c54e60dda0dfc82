//! Implicit price index from paired nominal/real revenue
//!
//! The price level of a year is the ratio of its nominal to its real revenue.
//! Dividing by the base year's ratio pins the base year to an index of 1.0.

use super::error::IndexError;
use super::series::{cumulative_inflation_pct, DerivedPoint, DerivedSeries, YearRecord};

/// Derive price index, cumulative and annual inflation anchored to `base_year`.
///
/// Input order does not matter, output is sorted by year. Annual inflation is
/// left empty for the earliest year since it has nothing to compare against.
pub fn compute(series: &[YearRecord], base_year: i32) -> Result<DerivedSeries, IndexError> {
    let mut records = series.to_vec();
    records.sort_by_key(|r| r.year);

    if let Some(pair) = records.windows(2).find(|w| w[0].year == w[1].year) {
        return Err(IndexError::DuplicateYear(pair[0].year));
    }

    let base = records
        .iter()
        .find(|r| r.year == base_year)
        .ok_or(IndexError::MissingBaseYear(base_year))?;
    let base_ratio = price_ratio(base)?;
    if base_ratio == 0.0 {
        return Err(IndexError::ZeroBaseRatio(base_year));
    }

    let mut points = Vec::with_capacity(records.len());
    let mut previous_index: Option<f64> = None;

    for record in &records {
        let ratio = price_ratio(record)?;
        let price_index = ratio / base_ratio;
        let annual_inflation_pct = previous_index.map(|prev| (price_index / prev - 1.0) * 100.0);

        points.push(DerivedPoint {
            year: record.year,
            nominal: record.nominal,
            real: record.real,
            price_ratio: ratio,
            price_index,
            cumulative_inflation_pct: cumulative_inflation_pct(price_index),
            annual_inflation_pct,
        });
        previous_index = Some(price_index);
    }

    Ok(DerivedSeries { base_year, points })
}

fn price_ratio(record: &YearRecord) -> Result<f64, IndexError> {
    if record.real == 0.0 {
        return Err(IndexError::ZeroRealRevenue(record.year));
    }
    Ok(record.nominal / record.real)
}
