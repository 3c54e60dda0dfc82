//! Delimited-text input: revenue series and annual inflation rates
//!
//! Files carry a header row. Headers and fields are trimmed, so `jahr; umsatz_nominal`
//! reads the same as `jahr;umsatz_nominal`. Records come back sorted by year.

use crate::core::{InflationRateRecord, NominalRecord, YearRecord};
use anyhow::Context;
use inflc_derive::CsvSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Input column description, generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
    pub description: &'static str,
}

/// Row of the nominal revenue file
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct NominalRow {
    /// Calendar year
    #[serde(alias = "jahr")]
    pub year: i32,
    /// Revenue at current prices
    #[serde(alias = "umsatz_nominal")]
    pub nominal: f64,
}

/// Row of the real revenue file
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct RealRow {
    /// Calendar year
    #[serde(alias = "jahr")]
    pub year: i32,
    /// Revenue at base year prices
    #[serde(alias = "umsatz_real")]
    pub real: f64,
}

/// Row of the annual inflation rate file
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct RateRow {
    /// Year the rate leads into
    #[serde(alias = "jahr")]
    pub year: i32,
    /// Fractional change against the previous year (0.03 = 3%)
    #[serde(alias = "inflation_rate_jahr")]
    pub rate: f64,
}

/// Read nominal revenue records
pub fn read_nominal<R: Read>(reader: R, delimiter: u8) -> anyhow::Result<Vec<NominalRecord>> {
    let rows: Vec<NominalRow> = read_rows(reader, delimiter)?;
    let records = rows
        .into_iter()
        .map(|row| NominalRecord {
            year: row.year,
            nominal: row.nominal,
        })
        .collect();
    sorted_by_year(records, |r| r.year)
}

/// Read real revenue records
pub fn read_real<R: Read>(reader: R, delimiter: u8) -> anyhow::Result<Vec<RealRow>> {
    let rows: Vec<RealRow> = read_rows(reader, delimiter)?;
    sorted_by_year(rows, |r| r.year)
}

/// Read annual inflation rates
pub fn read_rates<R: Read>(reader: R, delimiter: u8) -> anyhow::Result<Vec<InflationRateRecord>> {
    let rows: Vec<RateRow> = read_rows(reader, delimiter)?;
    let records = rows
        .into_iter()
        .map(|row| InflationRateRecord {
            year: row.year,
            rate: row.rate,
        })
        .collect();
    sorted_by_year(records, |r| r.year)
}

/// Join nominal and real revenue on year, keeping years present in both.
pub fn join_revenue(nominal: &[NominalRecord], real: &[RealRow]) -> Vec<YearRecord> {
    let joined: Vec<YearRecord> = nominal
        .iter()
        .filter_map(|n| {
            let matched = real.iter().find(|r| r.year == n.year);
            if matched.is_none() {
                log::debug!("No real revenue for {}, dropping year", n.year);
            }
            matched.map(|r| YearRecord {
                year: n.year,
                nominal: n.nominal,
                real: r.real,
            })
        })
        .collect();

    for r in real.iter().filter(|r| !nominal.iter().any(|n| n.year == r.year)) {
        log::debug!("No nominal revenue for {}, dropping year", r.year);
    }
    joined
}

/// Load and join the nominal and real revenue files
pub fn load_revenue(
    nominal_path: &Path,
    real_path: &Path,
    delimiter: u8,
) -> anyhow::Result<Vec<YearRecord>> {
    let nominal = read_nominal(open(nominal_path)?, delimiter)
        .with_context(|| format!("Failed to read nominal revenue from {}", nominal_path.display()))?;
    let real = read_real(open(real_path)?, delimiter)
        .with_context(|| format!("Failed to read real revenue from {}", real_path.display()))?;

    let joined = join_revenue(&nominal, &real);
    log::info!("Joined {} years of nominal and real revenue", joined.len());
    Ok(joined)
}

/// Load the annual inflation rate file
pub fn load_rates(path: &Path, delimiter: u8) -> anyhow::Result<Vec<InflationRateRecord>> {
    read_rates(open(path)?, delimiter)
        .with_context(|| format!("Failed to read inflation rates from {}", path.display()))
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("File not found: {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn read_rows<T, R>(reader: R, delimiter: u8) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    log::info!("Read {} csv records", rows.len());
    Ok(rows)
}

fn sorted_by_year<T>(mut records: Vec<T>, year: impl Fn(&T) -> i32) -> anyhow::Result<Vec<T>> {
    records.sort_by_key(|r| year(r));
    if let Some(pair) = records.windows(2).find(|w| year(&w[0]) == year(&w[1])) {
        anyhow::bail!("year {} appears more than once", year(&pair[0]));
    }
    Ok(records)
}
