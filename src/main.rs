use clap::{Parser, Subcommand};

mod chart;
mod cmd;
mod core;
mod data;
mod utils;

/// Implicit price index and inflation analysis of nominal and real revenue series
#[derive(Parser, Debug)]
#[command(name = "inflc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the implicit price index and inflation from nominal and real revenue
    Index(cmd::index::IndexCommand),
    /// Compare implicit inflation with annual inflation rates
    Compare(cmd::compare::CompareCommand),
    /// Draw terminal charts of revenue, price indices and inflation
    Chart(cmd::chart::ChartCommand),
    /// Write the computed series and their reconciliation to delimited files
    Export(cmd::export::ExportCommand),
    /// Print the expected input file formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Index(index) => index.exec(),
        Command::Compare(compare) => compare.exec(),
        Command::Chart(chart) => chart.exec(),
        Command::Export(export) => export.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
