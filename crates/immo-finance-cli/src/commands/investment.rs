use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use immo_finance_core::investment::expenses::ExpenseProfile;
use immo_finance_core::investment::{analyze_investment, InvestmentInput, TaxRegime};

use crate::input;

/// Arguments for a full investment analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct InvestArgs {
    /// Agreed sale price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Monthly rent
    #[arg(long, alias = "rent")]
    pub rental_income: Option<Decimal>,

    /// Tax regime: micro_bic or reel (default micro_bic)
    #[arg(long)]
    pub tax_regime: Option<String>,

    /// Marginal income tax bracket in percent (default 30)
    #[arg(long)]
    pub tax_bracket: Option<Decimal>,

    /// Notary fees rate as a decimal (default 0.08)
    #[arg(long)]
    pub notary_fees_rate: Option<Decimal>,

    /// Current monthly loan interest (reel regime deduction)
    #[arg(long)]
    pub loan_interest: Option<Decimal>,

    /// Annual appreciation rate as a decimal (default 0.02)
    #[arg(long)]
    pub appreciation_rate: Option<Decimal>,

    /// Holding horizon in years when there is no loan (default 10)
    #[arg(long)]
    pub investment_period: Option<u32>,

    /// Monthly agency / management fees
    #[arg(long)]
    pub management_fees: Option<Decimal>,

    /// Annual property tax (taxe fonciere)
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly landlord insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly maintenance provision
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Monthly co-ownership charges
    #[arg(long)]
    pub condo_fees: Option<Decimal>,

    /// Other monthly charges
    #[arg(long)]
    pub other_expenses: Option<Decimal>,

    /// Total monthly expenses; derived from the individual charges if absent
    #[arg(long)]
    pub total_monthly: Option<Decimal>,

    /// Path to JSON input file; required for loan_data (overrides flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_invest(args: InvestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let invest_input: InvestmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        build_input_from_flags(&args)?
    };

    let result = analyze_investment(&invest_input)?;
    Ok(serde_json::to_value(result)?)
}

fn build_input_from_flags(
    args: &InvestArgs,
) -> Result<InvestmentInput, Box<dyn std::error::Error>> {
    let expenses = build_expenses(args);

    Ok(InvestmentInput {
        purchase_price: args
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?,
        rental_income: args
            .rental_income
            .ok_or("--rental-income is required (or provide --input)")?,
        expenses,
        notary_fees_rate: args.notary_fees_rate,
        tax_regime: args.tax_regime.as_deref().map(parse_tax_regime).transpose()?,
        tax_bracket: args.tax_bracket,
        loan_interest: args.loan_interest,
        appreciation_rate: args.appreciation_rate,
        investment_period: args.investment_period,
        loan_data: None,
    })
}

fn build_expenses(args: &InvestArgs) -> ExpenseProfile {
    let management_fees = args.management_fees.unwrap_or(Decimal::ZERO);
    let property_tax = args.property_tax.unwrap_or(Decimal::ZERO);
    let insurance = args.insurance.unwrap_or(Decimal::ZERO);
    let maintenance = args.maintenance.unwrap_or(Decimal::ZERO);
    let condo_fees = args.condo_fees.unwrap_or(Decimal::ZERO);
    let other = args.other_expenses.unwrap_or(Decimal::ZERO);

    // Derived total spreads the annual property tax over twelve months
    let total_monthly = args.total_monthly.unwrap_or(
        management_fees + insurance + maintenance + condo_fees + other + property_tax / dec!(12),
    );

    ExpenseProfile {
        management_fees,
        property_tax,
        insurance,
        maintenance,
        condo_fees,
        other,
        total_monthly,
    }
}

fn parse_tax_regime(value: &str) -> Result<TaxRegime, Box<dyn std::error::Error>> {
    match value {
        "micro_bic" | "micro-bic" => Ok(TaxRegime::MicroBic),
        "reel" => Ok(TaxRegime::Reel),
        other => Err(format!("Unknown tax regime '{other}' (expected micro_bic or reel)").into()),
    }
}
