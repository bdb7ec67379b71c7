mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::investment::InvestArgs;
use commands::loan::{LoanArgs, ScheduleArgs};

/// Rental property investment calculations
#[derive(Parser)]
#[command(
    name = "immo",
    version,
    about = "Rental property investment calculations",
    long_about = "A CLI for analyzing rental property investments with decimal precision. \
                  Covers loan amortization, cash flow, French rental tax regimes \
                  (micro-BIC and reel), ROI decomposition and capital gains projections."
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
    /// Calculate loan metrics: monthly payment, total interest, schedule
    Loan(LoanArgs),
    /// Print the payment-by-payment amortization schedule
    Schedule(ScheduleArgs),
    /// Run a full investment analysis (cash flow, tax, ROI)
    Invest(InvestArgs),
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
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Invest(args) => commands::investment::run_invest(args),
        Commands::Version => {
            println!("immo {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
