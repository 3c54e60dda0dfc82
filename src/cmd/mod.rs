pub mod chart;
pub mod compare;
pub mod export;
pub mod index;
pub mod schema;

use crate::core::chained::{self, RateCoverage};
use crate::core::{
    implicit, reconcile, summarize, DerivedSeries, ErrorKind, IndexError, InflationRateRecord,
    NominalRecord, ReconciliationRow, ReconciliationSummary, ReconstructedSeries, YearRecord,
};
use crate::data;
use clap::Args;
use std::path::{Path, PathBuf};

/// Revenue inputs shared by every analysis command
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Delimited file with nominal revenue per year (year;nominal)
    #[arg(short, long)]
    pub nominal: PathBuf,

    /// Delimited file with real revenue per year (year;real)
    #[arg(short, long)]
    pub real: PathBuf,

    /// Year pinned to price index 1.0
    #[arg(short, long, default_value_t = 2020)]
    pub base_year: i32,

    /// Field delimiter of input and exported files
    #[arg(short, long, default_value_t = ';')]
    pub delimiter: char,
}

impl InputArgs {
    pub fn delimiter(&self) -> anyhow::Result<u8> {
        if !self.delimiter.is_ascii() {
            anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }

    pub fn load_revenue(&self) -> anyhow::Result<Vec<YearRecord>> {
        data::load_revenue(&self.nominal, &self.real, self.delimiter()?)
    }

    pub fn load_rates(&self, path: &Path) -> anyhow::Result<Vec<InflationRateRecord>> {
        data::load_rates(path, self.delimiter()?)
    }

    pub fn implicit_index(&self) -> anyhow::Result<DerivedSeries> {
        let records = self.load_revenue()?;
        core_step(
            implicit::compute(&records, self.base_year),
            "Failed to derive implicit price index",
        )
    }
}

/// Attach the failed step to a core error, logging its kind.
fn core_step<T>(result: Result<T, IndexError>, step: &'static str) -> anyhow::Result<T> {
    result.map_err(|err| {
        match err.kind() {
            ErrorKind::Data => log::debug!("{step}: inconsistent input data ({err:?})"),
            ErrorKind::Division => log::debug!("{step}: zero denominator ({err:?})"),
        }
        anyhow::Error::new(err).context(step)
    })
}

/// Both derivations of one input set and their reconciliation
#[derive(Debug, Clone)]
pub struct Comparison {
    pub derived: DerivedSeries,
    pub reconstructed: ReconstructedSeries,
    pub rates: Vec<InflationRateRecord>,
    pub rows: Vec<ReconciliationRow>,
    pub summary: ReconciliationSummary,
}

/// Derive the implicit index, rebuild real revenue from `rates`, and reconcile the two.
pub fn compare(
    records: &[YearRecord],
    rates: Vec<InflationRateRecord>,
    base_year: i32,
    coverage: RateCoverage,
) -> anyhow::Result<Comparison> {
    let derived = core_step(
        implicit::compute(records, base_year),
        "Failed to derive implicit price index",
    )?;

    let nominal: Vec<NominalRecord> = records.iter().map(Into::into).collect();
    let reconstructed = core_step(
        chained::compute(&nominal, &rates, base_year, coverage),
        "Failed to reconstruct real revenue from inflation rates",
    )?;

    for step in chained::chain(&rates) {
        log::debug!(
            "Chain {}: rate {:+.4}, index {:.6}",
            step.year,
            step.rate,
            step.price_index
        );
    }
    for year in reconstructed.defaulted_years() {
        log::warn!("No inflation rate for {year}: real revenue defaults to nominal revenue");
    }

    let rows = reconcile(&derived, &reconstructed);
    let summary = summarize(&rows, &rates);
    log::info!("Reconciled {} years", rows.len());

    Ok(Comparison {
        derived,
        reconstructed,
        rates,
        rows,
        summary,
    })
}
