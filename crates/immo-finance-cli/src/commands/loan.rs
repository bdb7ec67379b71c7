use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use immo_finance_core::loan::{self, LoanInput};

use crate::input;

/// Arguments for loan metrics calculation
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate as a decimal (e.g. 0.03 for 3%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for schedule generation (same loan terms as `loan`)
#[derive(Args)]
pub struct ScheduleArgs {
    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate as a decimal (e.g. 0.03 for 3%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(
        args.input.as_deref(),
        args.loan_amount,
        args.interest_rate,
        args.term_years,
    )?;

    let result = loan::calculate_loan_metrics(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(
        args.input.as_deref(),
        args.loan_amount,
        args.interest_rate,
        args.term_years,
    )?;

    let schedule = loan::generate_schedule(
        loan_input.loan_amount,
        loan_input.interest_rate,
        loan_input.term_years,
    )?;
    Ok(serde_json::to_value(schedule)?)
}

/// Loan terms from a file, piped stdin, or individual flags, in that order.
fn resolve_loan_input(
    input_path: Option<&str>,
    loan_amount: Option<Decimal>,
    interest_rate: Option<Decimal>,
    term_years: Option<u32>,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanInput {
        loan_amount: loan_amount.ok_or("--loan-amount is required (or provide --input)")?,
        interest_rate: interest_rate.ok_or("--interest-rate is required (or provide --input)")?,
        term_years: term_years.ok_or("--term-years is required (or provide --input)")?,
    })
}
