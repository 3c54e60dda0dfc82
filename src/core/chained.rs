//! Chained price index from externally supplied annual inflation rates
//!
//! Each rate moves the index one year forward by a factor of `1 + rate`, so the
//! rate sequence must be processed in ascending year order. Real revenue is
//! rebuilt by deflating nominal revenue with the chained index.

use super::error::IndexError;
use super::series::{
    cumulative_inflation_pct, InflationRateRecord, NominalRecord, ReconstructedPoint,
    ReconstructedSeries,
};

/// How to treat years of the nominal series that have no rate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateCoverage {
    /// Keep index 1.0 and real revenue equal to nominal revenue for the year
    #[default]
    Lenient,
    /// Fail with [`IndexError::MissingRate`]
    Strict,
}

/// Index value reached after applying one year's rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStep {
    pub year: i32,
    pub rate: f64,
    pub price_index: f64,
}

/// Running product of `1 + rate` over `rates`, one step per rate year.
pub fn chain(rates: &[InflationRateRecord]) -> Vec<ChainStep> {
    rates
        .iter()
        .scan(1.0_f64, |index, r| {
            *index *= 1.0 + r.rate;
            Some(ChainStep {
                year: r.year,
                rate: r.rate,
                price_index: *index,
            })
        })
        .collect()
}

/// Rebuild a real revenue series from nominal revenue and annual inflation rates.
pub fn compute(
    nominal: &[NominalRecord],
    rates: &[InflationRateRecord],
    base_year: i32,
    coverage: RateCoverage,
) -> Result<ReconstructedSeries, IndexError> {
    let mut records = nominal.to_vec();
    records.sort_by_key(|r| r.year);

    if let Some(pair) = records.windows(2).find(|w| w[0].year == w[1].year) {
        return Err(IndexError::DuplicateYear(pair[0].year));
    }
    if !records.iter().any(|r| r.year == base_year) {
        return Err(IndexError::MissingBaseYear(base_year));
    }
    check_rate_order(rates)?;
    if let Some(rate) = rates
        .iter()
        .find(|rate| !records.iter().any(|r| r.year == rate.year))
    {
        return Err(IndexError::MissingNominalYear(rate.year));
    }

    let steps = chain(rates);

    // The base year stays at 1.0 even when its rate is part of the chain.
    let points = records
        .iter()
        .map(|record| match steps.iter().find(|s| s.year == record.year) {
            Some(step) if record.year == base_year => Ok(point(record, Some(step.rate), 1.0)),
            Some(step) => Ok(point(record, Some(step.rate), step.price_index)),
            None if record.year != base_year && coverage == RateCoverage::Strict => {
                Err(IndexError::MissingRate(record.year))
            }
            None => Ok(point(record, None, 1.0)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReconstructedSeries { base_year, points })
}

fn point(record: &NominalRecord, rate: Option<f64>, price_index: f64) -> ReconstructedPoint {
    ReconstructedPoint {
        year: record.year,
        nominal: record.nominal,
        rate,
        chained_price_index: price_index,
        real_revenue_reconstructed: record.nominal / price_index,
        cumulative_inflation_pct: cumulative_inflation_pct(price_index),
    }
}

fn check_rate_order(rates: &[InflationRateRecord]) -> Result<(), IndexError> {
    for pair in rates.windows(2) {
        let (previous, year) = (pair[0].year, pair[1].year);
        if year == previous {
            return Err(IndexError::DuplicateRateYear(year));
        }
        if year < previous {
            return Err(IndexError::UnsortedRates { year, previous });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn nominal(year: i32, nominal: f64) -> NominalRecord {
        NominalRecord { year, nominal }
    }

    fn rate(year: i32, rate: f64) -> InflationRateRecord {
        InflationRateRecord { year, rate }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn series() -> Vec<NominalRecord> {
        vec![
            nominal(2020, 14.99),
            nominal(2021, 15.87),
            nominal(2022, 15.31),
            nominal(2023, 16.08),
        ]
    }

    #[test]
    fn single_rate_example() {
        let result = compute(
            &[nominal(2020, 10.0), nominal(2021, 10.5)],
            &[rate(2021, 0.03)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap();

        let point = result.get(2021).unwrap();
        assert_close(point.chained_price_index, 1.03);
        assert_close(point.real_revenue_reconstructed, 10.5 / 1.03);
        assert!((point.real_revenue_reconstructed - 10.194).abs() < 0.001);
        assert_close(point.cumulative_inflation_pct, 3.0);
        assert_eq!(point.rate, Some(0.03));
    }

    #[test]
    fn base_year_pinned() {
        let result = compute(
            &series(),
            &[rate(2021, 0.031), rate(2022, 0.134)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap();

        let base = result.get(2020).unwrap();
        assert_eq!(base.chained_price_index, 1.0);
        assert_eq!(base.real_revenue_reconstructed, base.nominal);
        assert_eq!(base.cumulative_inflation_pct, 0.0);
    }

    #[test]
    fn index_is_product_of_factors() {
        let rates = vec![rate(2021, 0.031), rate(2022, 0.134), rate(2023, 0.124)];
        let result = compute(&series(), &rates, 2020, RateCoverage::Strict).unwrap();

        let mut expected = 1.0;
        for r in &rates {
            expected *= 1.0 + r.rate;
            let point = result.get(r.year).unwrap();
            assert_eq!(point.chained_price_index, expected);
            assert_eq!(point.real_revenue_reconstructed, point.nominal / expected);
        }
    }

    #[test]
    fn chaining_is_multiplicative_not_additive() {
        let steps = chain(&[rate(2021, 0.10), rate(2022, 0.10)]);
        assert_close(steps[1].price_index, 1.21);
    }

    #[test]
    fn out_of_order_rates_rejected() {
        let err = compute(
            &series(),
            &[rate(2022, 0.134), rate(2021, 0.031)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap_err();
        assert_eq!(
            err,
            IndexError::UnsortedRates {
                year: 2021,
                previous: 2022
            }
        );
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn duplicate_rate_year_rejected() {
        let err = compute(
            &series(),
            &[rate(2021, 0.031), rate(2021, 0.02)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap_err();
        assert_eq!(err, IndexError::DuplicateRateYear(2021));
    }

    #[test]
    fn rate_without_nominal_year_rejected() {
        let err = compute(
            &series(),
            &[rate(2021, 0.031), rate(2024, 0.014)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap_err();
        assert_eq!(err, IndexError::MissingNominalYear(2024));
    }

    #[test]
    fn missing_base_year() {
        let err = compute(
            &[nominal(2021, 10.5)],
            &[rate(2021, 0.03)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap_err();
        assert_eq!(err, IndexError::MissingBaseYear(2020));
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn lenient_defaults_uncovered_years_to_nominal() {
        let result = compute(&series(), &[rate(2021, 0.031)], 2020, RateCoverage::Lenient).unwrap();

        for year in [2022, 2023] {
            let point = result.get(year).unwrap();
            assert_eq!(point.chained_price_index, 1.0);
            assert_eq!(point.real_revenue_reconstructed, point.nominal);
            assert_eq!(point.cumulative_inflation_pct, 0.0);
            assert_eq!(point.rate, None);
        }
        assert_eq!(result.defaulted_years(), vec![2022, 2023]);
    }

    #[test]
    fn strict_rejects_uncovered_year() {
        let err = compute(&series(), &[rate(2021, 0.031)], 2020, RateCoverage::Strict).unwrap_err();
        assert_eq!(err, IndexError::MissingRate(2022));
    }

    #[test]
    fn base_year_rate_carried_into_later_years() {
        let result = compute(
            &series(),
            &[rate(2020, 0.05), rate(2021, 0.031)],
            2020,
            RateCoverage::Lenient,
        )
        .unwrap();

        let base = result.get(2020).unwrap();
        assert_eq!(base.chained_price_index, 1.0);
        assert_eq!(base.real_revenue_reconstructed, base.nominal);
        assert_eq!(base.cumulative_inflation_pct, 0.0);
        assert_eq!(base.rate, Some(0.05));
        assert_close(result.get(2021).unwrap().chained_price_index, 1.05 * 1.031);
        assert!(result.defaulted_years().is_empty());
    }

    #[test]
    fn base_year_rate_counts_in_mean_and_chain() {
        let nominal = [nominal(2020, 10.0), nominal(2021, 10.5)];
        let rates = [rate(2020, 0.05), rate(2021, 0.03)];
        let result = compute(&nominal, &rates, 2020, RateCoverage::Strict).unwrap();

        assert_close(result.get(2021).unwrap().chained_price_index, 1.0815);
        let summary = crate::core::summarize(&[], &rates);
        assert_close(summary.mean_annual_rate_b.unwrap(), 4.0);
    }

    #[test]
    fn rates_before_base_year_chained_forward() {
        let nominal = [
            nominal(2019, 9.8),
            nominal(2020, 10.0),
            nominal(2021, 10.5),
        ];
        let result = compute(
            &nominal,
            &[rate(2019, 0.02), rate(2021, 0.03)],
            2020,
            RateCoverage::Strict,
        )
        .unwrap();

        let before = result.get(2019).unwrap();
        assert_close(before.chained_price_index, 1.02);
        assert_close(before.real_revenue_reconstructed, 9.8 / 1.02);
        assert_close(before.cumulative_inflation_pct, 2.0);
        assert_eq!(result.get(2020).unwrap().chained_price_index, 1.0);
        assert_close(result.get(2021).unwrap().chained_price_index, 1.02 * 1.03);
    }

    #[test]
    fn output_sorted_by_year() {
        let mut unsorted = series();
        unsorted.reverse();
        let result = compute(&unsorted, &[rate(2021, 0.031)], 2020, RateCoverage::Lenient).unwrap();
        let years: Vec<_> = result.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022, 2023]);
    }

    #[test]
    fn repeated_calls_identical() {
        let rates = vec![rate(2021, 0.031), rate(2022, 0.134), rate(2023, 0.124)];
        let first = compute(&series(), &rates, 2020, RateCoverage::Lenient).unwrap();
        let second = compute(&series(), &rates, 2020, RateCoverage::Lenient).unwrap();
        assert_eq!(first, second);
    }
}
