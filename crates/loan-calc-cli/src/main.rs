mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::{ChartArgs, ExportArgs, ScheduleArgs};

/// Loan amortization schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortization schedules with decimal precision",
    long_about = "A CLI for computing month-by-month loan payment schedules with \
                  decimal precision. Supports amortized, interest-only, deferred \
                  and balloon repayment variants, chart-ready projections, and \
                  CSV export."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a month-by-month payment schedule
    Schedule(ScheduleArgs),
    /// Project a schedule into chart-ready series
    Chart(ChartArgs),
    /// Write a schedule to a CSV file
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Chart(args) => commands::schedule::run_chart(args),
        Commands::Export(args) => commands::schedule::run_export(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            // Null means the command already wrote its output (stdout export)
            if !value.is_null() {
                output::format_output(&cli.output, &value);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
