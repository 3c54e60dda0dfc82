//! Index command - implicit price index and inflation per year

use crate::cmd::InputArgs;
use crate::core::{DerivedPoint, DerivedSeries};
use crate::utils::{self, format_amount, format_index, format_pct};
use clap::Args;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct IndexCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output the derived series as delimited text (see --delimiter) instead of formatted tables
    #[arg(long)]
    csv: bool,
}

impl IndexCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let series = self.input.implicit_index()?;

        if self.csv {
            utils::write_csv(&series.points, io::stdout(), self.input.delimiter()?)
        } else {
            print_series(&series);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct RevenueRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Nominal")]
    nominal: String,
    #[tabled(rename = "Real")]
    real: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct IndexRow {
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Price Index")]
    pub price_index: String,
    #[tabled(rename = "Cumulative (%)")]
    pub cumulative: String,
    #[tabled(rename = "Annual (%)")]
    pub annual: String,
}

impl From<&DerivedPoint> for IndexRow {
    fn from(point: &DerivedPoint) -> Self {
        IndexRow {
            year: point.year,
            price_index: format_index(point.price_index),
            cumulative: format_pct(point.cumulative_inflation_pct),
            annual: point
                .annual_inflation_pct
                .map_or_else(|| "Base".to_string(), format_pct),
        }
    }
}

fn print_series(series: &DerivedSeries) {
    println!();
    println!(
        "IMPLICIT INFLATION (base year {} = 1.0)",
        series.base_year
    );
    println!();

    let revenue: Vec<_> = series
        .points
        .iter()
        .map(|p| RevenueRow {
            year: p.year,
            nominal: format_amount(p.nominal),
            real: format_amount(p.real),
        })
        .collect();
    println!("{}", table(&revenue));
    println!();

    let rows: Vec<IndexRow> = series.points.iter().map(Into::into).collect();
    println!("{}", table(&rows));
    println!();

    println!("Price Index: price level relative to {}", series.base_year);
    println!("Cumulative:  total price change since {} in %", series.base_year);
    println!("Annual:      price change against the previous year in %");
}

pub fn table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}
