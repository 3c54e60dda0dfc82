//! Compare command - implicit inflation against inflation rates from an external source

use crate::cmd::index::table;
use crate::cmd::{self, Comparison, InputArgs};
use crate::core::{RateCoverage, ReconciliationRow, ReconciliationSummary};
use crate::utils::{format_amount, format_index, format_pct};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct CompareCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Delimited file with annual inflation rates (year;rate)
    #[arg(long)]
    rates: PathBuf,

    /// Fail when a year has no inflation rate instead of treating it as zero inflation
    #[arg(long)]
    strict: bool,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ComparisonOutput<'a> {
    base_year: i32,
    defaulted_years: Vec<i32>,
    rows: &'a [ReconciliationRow],
    summary: &'a ReconciliationSummary,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = self.input.load_revenue()?;
        let rates = self.input.load_rates(&self.rates)?;
        let comparison = cmd::compare(&records, rates, self.input.base_year, self.coverage())?;

        if self.json {
            print_json(&comparison)
        } else {
            print_comparison(&comparison);
            Ok(())
        }
    }

    fn coverage(&self) -> RateCoverage {
        if self.strict {
            RateCoverage::Strict
        } else {
            RateCoverage::Lenient
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct RateTableRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Rate (%)")]
    rate: String,
    #[tabled(rename = "Chained Index")]
    price_index: String,
}

#[derive(Debug, Clone, Tabled)]
struct RealRevenueRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Nominal")]
    nominal: String,
    #[tabled(rename = "Real (implicit)")]
    real_a: String,
    #[tabled(rename = "Real (rates)")]
    real_b: String,
    #[tabled(rename = "Difference")]
    diff: String,
}

#[derive(Debug, Clone, Tabled)]
struct CumulativeRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Implicit (%)")]
    cum_a: String,
    #[tabled(rename = "Rates (%)")]
    cum_b: String,
    #[tabled(rename = "Difference")]
    diff: String,
}

fn print_comparison(comparison: &Comparison) {
    let base_year = comparison.derived.base_year;

    println!();
    println!("INFLATION COMPARISON: implicit vs. annual rates (base year {base_year})");
    println!();

    let rates: Vec<_> = comparison
        .rates
        .iter()
        .map(|r| RateTableRow {
            year: r.year,
            rate: format_pct(r.rate * 100.0),
            price_index: comparison
                .reconstructed
                .get(r.year)
                .map_or_else(String::new, |p| format_index(p.chained_price_index)),
        })
        .collect();
    println!("Annual inflation rates");
    println!("{}", table(&rates));
    println!();

    let real: Vec<_> = comparison
        .rows
        .iter()
        .map(|row| RealRevenueRow {
            year: row.year,
            nominal: comparison
                .derived
                .get(row.year)
                .map_or_else(String::new, |p| format_amount(p.nominal)),
            real_a: format_amount(row.real_a),
            real_b: format_amount(row.real_b),
            diff: format_pct(row.real_diff),
        })
        .collect();
    println!("Real revenue");
    println!("{}", table(&real));
    println!();

    println!("Cumulative inflation since {base_year}");
    println!("{}", table(&cumulative_rows(&comparison.rows)));
    println!();

    print_insights(&comparison.summary, base_year);

    let defaulted = comparison.reconstructed.defaulted_years();
    if !defaulted.is_empty() {
        println!();
        println!(
            "\u{26A0} No inflation rate for {}: real revenue taken as nominal revenue",
            join_years(&defaulted)
        );
    }
}

fn cumulative_rows(rows: &[ReconciliationRow]) -> Vec<CumulativeRow> {
    rows.iter()
        .map(|row| CumulativeRow {
            year: row.year,
            cum_a: format_pct(row.cum_inflation_a),
            cum_b: format_pct(row.cum_inflation_b),
            diff: format_pct(row.cum_inflation_diff),
        })
        .collect()
}

fn print_insights(summary: &ReconciliationSummary, base_year: i32) {
    println!("INSIGHTS");
    if let (Some(year), Some(a), Some(b), Some(diff)) = (
        summary.final_year,
        summary.final_cum_inflation_a,
        summary.final_cum_inflation_b,
        summary.final_year_diff_pct,
    ) {
        println!("  Total inflation {base_year}-{year} (implicit): {}%", format_pct(a));
        println!("  Total inflation {base_year}-{year} (rates):    {}%", format_pct(b));
        println!("  Difference:                          {} percentage points", format_pct(diff));
    } else {
        println!("  No common years to compare");
    }
    if let Some(mean) = summary.mean_annual_rate_b {
        println!("  Mean annual inflation (rates):       {}%", format_pct(mean));
    }
}

fn print_json(comparison: &Comparison) -> anyhow::Result<()> {
    let output = ComparisonOutput {
        base_year: comparison.derived.base_year,
        defaulted_years: comparison.reconstructed.defaulted_years(),
        rows: &comparison.rows,
        summary: &comparison.summary,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn join_years(years: &[i32]) -> String {
    years
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_inflation_signed_like_insights() {
        let rows = [ReconciliationRow {
            year: 2021,
            real_a: 10.0,
            real_b: 10.2,
            real_diff: 0.2,
            cum_inflation_a: 4.76,
            cum_inflation_b: -1.5,
            cum_inflation_diff: -6.26,
        }];

        let table_rows = cumulative_rows(&rows);
        assert_eq!(table_rows[0].cum_a, "+4.76");
        assert_eq!(table_rows[0].cum_b, "-1.50");
        assert_eq!(table_rows[0].diff, "-6.26");
    }

    #[test]
    fn years_joined_for_warning() {
        assert_eq!(join_years(&[2019]), "2019");
        assert_eq!(join_years(&[2019, 2026]), "2019, 2026");
    }
}
