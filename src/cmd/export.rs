//! Export command - write the computed series to delimited files

use crate::cmd::{self, InputArgs};
use crate::core::RateCoverage;
use crate::utils::write_csv;
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const IMPLICIT_FILE: &str = "implicit_index.csv";
pub const CHAINED_FILE: &str = "chained_index.csv";
pub const RECONCILIATION_FILE: &str = "reconciliation.csv";

#[derive(Args, Debug)]
pub struct ExportCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Delimited file with annual inflation rates (year;rate)
    #[arg(long)]
    rates: PathBuf,

    /// Fail when a year has no inflation rate instead of treating it as zero inflation
    #[arg(long)]
    strict: bool,

    /// Directory to write the result files into (created if missing)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let delimiter = self.input.delimiter()?;
        let records = self.input.load_revenue()?;
        let rates = self.input.load_rates(&self.rates)?;
        let coverage = if self.strict {
            RateCoverage::Strict
        } else {
            RateCoverage::Lenient
        };
        let comparison = cmd::compare(&records, rates, self.input.base_year, coverage)?;

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let written = [
            self.write(IMPLICIT_FILE, &comparison.derived.points, delimiter)?,
            self.write(CHAINED_FILE, &comparison.reconstructed.points, delimiter)?,
            self.write(RECONCILIATION_FILE, &comparison.rows, delimiter)?,
        ];
        for path in written {
            println!("\u{2713} Saved {}", path.display());
        }
        Ok(())
    }

    fn write<R: Serialize>(&self, name: &str, records: &[R], delimiter: u8) -> anyhow::Result<PathBuf> {
        let path = self.output_dir.join(name);
        write_file(&path, records, delimiter)?;
        log::info!("Wrote {} rows to {}", records.len(), path.display());
        Ok(path)
    }
}

fn write_file<R: Serialize>(path: &Path, records: &[R], delimiter: u8) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(records, BufWriter::new(file), delimiter)
        .with_context(|| format!("Failed to write {}", path.display()))
}
