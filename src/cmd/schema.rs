//! Schema command - print expected input formats

use crate::data::{CsvColumn, NominalRow, RateRow, RealRow};
use clap::Args;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Print only the header row of each input file
    #[arg(long)]
    header: bool,

    /// Field delimiter used in the printed header rows
    #[arg(short, long, default_value_t = ';')]
    delimiter: char,
}

/// Input files and the columns each one is read with
fn inputs() -> [(&'static str, &'static [CsvColumn]); 3] {
    [
        ("--nominal", NominalRow::csv_columns()),
        ("--real", RealRow::csv_columns()),
        ("--rates", RateRow::csv_columns()),
    ]
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.header {
            for (_, columns) in inputs() {
                println!("{}", header_row(columns, self.delimiter));
            }
            return Ok(());
        }

        println!("Input Formats");
        println!("=============");
        for (flag, columns) in inputs() {
            println!();
            println!("{flag}");
            for column in columns {
                println!("{}", describe(column));
            }
        }
        println!();
        println!("Headers are matched after trimming; aliases are accepted in place of the column name.");
        println!("Rates are fractions: 0.031 means 3.1% inflation against the previous year.");
        Ok(())
    }
}

fn header_row(columns: &[CsvColumn], delimiter: char) -> String {
    columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

fn describe(column: &CsvColumn) -> String {
    let req = if column.required { "required" } else { "optional" };
    let mut line = format!("  {:12} ({:8})  {}", column.name, req, column.description);
    if !column.aliases.is_empty() {
        line.push_str(&format!(" [alias: {}]", column.aliases.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_rows_use_delimiter() {
        assert_eq!(header_row(NominalRow::csv_columns(), ';'), "year;nominal");
        assert_eq!(header_row(RealRow::csv_columns(), ','), "year,real");
    }

    #[test]
    fn description_lists_aliases() {
        let line = describe(&NominalRow::csv_columns()[1]);
        assert!(line.contains("required"));
        assert!(line.contains("Revenue at current prices"));
        assert!(line.ends_with("[alias: umsatz_nominal]"));
    }
}
