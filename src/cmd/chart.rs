//! Chart command - terminal charts of revenue, price indices and inflation

use crate::chart::{render_bars, render_lines, Line};
use crate::cmd::{self, InputArgs};
use crate::core::{DerivedSeries, InflationRateRecord, RateCoverage, ReconstructedSeries};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ChartCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Delimited file with annual inflation rates; adds the rate-based series
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Fail when a year has no inflation rate instead of treating it as zero inflation
    #[arg(long)]
    strict: bool,

    /// Chart width in characters
    #[arg(long, default_value_t = 60)]
    width: usize,

    /// Chart height in rows
    #[arg(long, default_value_t = 15)]
    height: usize,
}

impl ChartCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (derived, reconstructed) = match &self.rates {
            Some(path) => {
                let records = self.input.load_revenue()?;
                let rates = self.input.load_rates(path)?;
                let coverage = if self.strict {
                    RateCoverage::Strict
                } else {
                    RateCoverage::Lenient
                };
                let comparison = cmd::compare(&records, rates, self.input.base_year, coverage)?;
                (
                    comparison.derived,
                    Some((comparison.reconstructed, comparison.rates)),
                )
            }
            None => (self.input.implicit_index()?, None),
        };

        let chained = reconstructed
            .as_ref()
            .map(|(series, rates)| (series, rates.as_slice()));
        for chart in render_all(&derived, chained, self.width, self.height) {
            println!("{chart}");
        }
        Ok(())
    }
}

/// Revenue lines, price index lines, and inflation bars.
fn render_all(
    derived: &DerivedSeries,
    reconstructed: Option<(&ReconstructedSeries, &[InflationRateRecord])>,
    width: usize,
    height: usize,
) -> Vec<String> {
    let base_year = derived.base_year;

    let mut revenue = vec![
        Line {
            label: "nominal",
            marker: 'n',
            points: derived.points.iter().map(|p| (p.year, p.nominal)).collect(),
        },
        Line {
            label: "real (implicit)",
            marker: 'r',
            points: derived.points.iter().map(|p| (p.year, p.real)).collect(),
        },
    ];
    let mut index = vec![Line {
        label: "implicit",
        marker: 'i',
        points: derived.points.iter().map(|p| (p.year, p.price_index)).collect(),
    }];

    if let Some((series, _)) = reconstructed {
        revenue.push(Line {
            label: "real (rates)",
            marker: 'd',
            points: series
                .points
                .iter()
                .map(|p| (p.year, p.real_revenue_reconstructed))
                .collect(),
        });
        index.push(Line {
            label: "chained",
            marker: 'c',
            points: series
                .points
                .iter()
                .map(|p| (p.year, p.chained_price_index))
                .collect(),
        });
    }

    let mut charts = vec![
        render_lines("Revenue", &revenue, width, height),
        render_lines(
            &format!("Price index ({base_year} = 1.0)"),
            &index,
            width,
            height,
        ),
    ];

    let implicit_bars: Vec<_> = derived
        .points
        .iter()
        .map(|p| (p.year, p.cumulative_inflation_pct))
        .collect();
    charts.push(render_bars(
        &format!("Cumulative inflation since {base_year} (implicit)"),
        &implicit_bars,
        width / 2,
        "%",
    ));

    let annual_bars: Vec<_> = derived
        .points
        .iter()
        .filter_map(|p| p.annual_inflation_pct.map(|a| (p.year, a)))
        .collect();
    charts.push(render_bars("Annual inflation (implicit)", &annual_bars, width / 2, "%"));

    if let Some((series, rates)) = reconstructed {
        let rate_bars: Vec<_> = rates.iter().map(|r| (r.year, r.rate * 100.0)).collect();
        charts.push(render_bars("Annual inflation (rates)", &rate_bars, width / 2, "%"));

        let chained_bars: Vec<_> = series
            .points
            .iter()
            .map(|p| (p.year, p.cumulative_inflation_pct))
            .collect();
        charts.push(render_bars(
            &format!("Cumulative inflation since {base_year} (rates)"),
            &chained_bars,
            width / 2,
            "%",
        ));
    }

    charts
}
