use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoFinanceError;
use crate::investment::acquisition::{
    compute_purchase_costs, PurchaseCosts, DEFAULT_NOTARY_FEES_RATE,
};
use crate::investment::depreciation::{compute_depreciation, DepreciationProfile};
use crate::investment::expenses::{
    compute_monthly_cashflow, ExpenseProfile, MonthlyExpenseBreakdown,
};
use crate::investment::returns::{
    compute_total_roi, project_capital_gains, CapitalGainsProjection, RoiBreakdown, RoiInput,
    DEFAULT_APPRECIATION_RATE,
};
use crate::investment::tax::{
    compute_tax_impact, compute_yearly_tax_projection, TaxImpact, TaxRegime, YearlyTaxProjection,
    DEFAULT_TAX_BRACKET,
};
use crate::loan::AmortizationSchedule;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::ImmoFinanceResult;

/// Holding horizon assumed when there is no loan and no explicit period.
pub const DEFAULT_INVESTMENT_PERIOD: u32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan context for an analysis: a previously generated schedule and the
/// term it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanData {
    /// Loan term in years
    pub term_years: u32,
    /// Schedule produced by the loan module
    pub amortization_schedule: AmortizationSchedule,
}

/// Parameters for a full investment analysis.
///
/// Only the price, rent and expenses are required; every other field falls
/// back to a documented default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Agreed sale price
    pub purchase_price: Money,
    /// Monthly rent
    pub rental_income: Money,
    /// Operating expense profile
    pub expenses: ExpenseProfile,
    /// Notary fees rate; defaults to 8%
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notary_fees_rate: Option<Rate>,
    /// Tax regime; defaults to micro-BIC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_regime: Option<TaxRegime>,
    /// Marginal bracket in percent; defaults to 30
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_bracket: Option<Decimal>,
    /// Current monthly loan interest for the single-year tax view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_interest: Option<Money>,
    /// Annual appreciation; defaults to 2%
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appreciation_rate: Option<Rate>,
    /// Holding horizon in years when no loan term applies; defaults to 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_period: Option<u32>,
    /// Loan schedule for year-by-year interest deductions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_data: Option<LoanData>,
}

/// Aggregate result of an investment analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Acquisition cost breakdown
    pub purchase_costs: PurchaseCosts,
    /// Monthly rent, echoed from the input
    pub rental_income: Money,
    /// Regime the analysis was run under
    pub tax_regime: TaxRegime,
    /// Rent minus monthly expenses
    pub monthly_cashflow: Money,
    /// Monthly cash flow annualized
    pub annual_cashflow: Money,
    /// Cash flow net of the year's total tax
    pub after_tax_monthly_cashflow: Money,
    pub after_tax_annual_cashflow: Money,
    /// After-tax annual cash flow over acquisition cost, in percent
    pub after_tax_roi: Percent,
    /// Expenses restated per month
    pub expense_breakdown: MonthlyExpenseBreakdown,
    /// Annual depreciation components
    pub depreciation: DepreciationProfile,
    /// Current-year tax outcome
    pub tax_impact: TaxImpact,
    /// Year-by-year tax projection over the horizon
    pub yearly_tax_projection: Vec<YearlyTaxProjection>,
    /// First-year return decomposition
    pub roi: RoiBreakdown,
    /// Value growth over the holding period
    pub capital_gains: CapitalGainsProjection,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full investment analysis: acquisition costs, cash flow, tax
/// impact under the selected regime, yearly projection, ROI decomposition
/// and capital gains.
///
/// Returns a `ComputationOutput<AnalysisResult>` with warnings for inputs
/// that are valid but easy to get wrong.
pub fn analyze_investment(
    input: &InvestmentInput,
) -> ImmoFinanceResult<ComputationOutput<AnalysisResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let tax_regime = input.tax_regime.unwrap_or_default();
    let tax_bracket = input.tax_bracket.unwrap_or(DEFAULT_TAX_BRACKET);
    let notary_fees_rate = input.notary_fees_rate.unwrap_or(DEFAULT_NOTARY_FEES_RATE);
    let appreciation_rate = input.appreciation_rate.unwrap_or(DEFAULT_APPRECIATION_RATE);
    let monthly_loan_interest = input.loan_interest.unwrap_or(Decimal::ZERO);
    let investment_period = input.investment_period.unwrap_or(DEFAULT_INVESTMENT_PERIOD);

    if tax_regime == TaxRegime::MicroBic && monthly_loan_interest > Decimal::ZERO {
        warnings.push(
            "Loan interest is only deductible under the regime reel; micro-BIC figures ignore it"
                .to_string(),
        );
    }

    // --- Acquisition and cash flow ---
    let purchase_costs = compute_purchase_costs(input.purchase_price, notary_fees_rate);
    let depreciation =
        compute_depreciation(purchase_costs.purchase_price, purchase_costs.notary_fees);

    let monthly_cashflow = compute_monthly_cashflow(input.rental_income, &input.expenses);
    let annual_cashflow = monthly_cashflow * dec!(12);

    // --- Current-year tax ---
    let tax_impact = compute_tax_impact(
        input.rental_income,
        &input.expenses,
        tax_regime,
        tax_bracket,
        monthly_loan_interest,
        Some(&depreciation),
    );

    let after_tax_annual_cashflow = annual_cashflow - tax_impact.total_tax;
    let after_tax_monthly_cashflow = monthly_cashflow - tax_impact.total_tax / dec!(12);
    let after_tax_roi = if purchase_costs.total_cost.is_zero() {
        Decimal::ZERO
    } else {
        after_tax_annual_cashflow / purchase_costs.total_cost * dec!(100)
    };

    // --- Projection horizon: loan term when a schedule exists ---
    let schedule = input.loan_data.as_ref().map(|l| &l.amortization_schedule);
    let horizon = input
        .loan_data
        .as_ref()
        .map(|l| l.term_years)
        .unwrap_or(investment_period);

    if let Some(loan) = &input.loan_data {
        let covered = loan.amortization_schedule.full_years();
        if covered < loan.term_years {
            warnings.push(format!(
                "Amortization schedule covers {covered} full year(s) of a {}-year term; \
                 later years deduct no interest",
                loan.term_years
            ));
        }
    }

    let yearly_tax_projection = compute_yearly_tax_projection(
        input.rental_income,
        &input.expenses,
        schedule,
        horizon,
        tax_regime,
        tax_bracket,
        Some(&depreciation),
    );

    // --- Returns ---
    let annual_principal_paid = schedule
        .map(|s| s.principal_paid_in_year(1))
        .unwrap_or(Decimal::ZERO);

    let roi = compute_total_roi(&RoiInput {
        annual_cashflow,
        total_investment: purchase_costs.total_cost,
        purchase_price: purchase_costs.purchase_price,
        appreciation_rate: Some(appreciation_rate),
        annual_principal_paid: Some(annual_principal_paid),
        tax_regime,
        tax_bracket: Some(tax_bracket),
        depreciation: Some(depreciation.clone()),
    });

    let capital_gains =
        project_capital_gains(purchase_costs.purchase_price, appreciation_rate, investment_period);

    let result = AnalysisResult {
        purchase_costs,
        rental_income: input.rental_income,
        tax_regime,
        monthly_cashflow,
        annual_cashflow,
        after_tax_monthly_cashflow,
        after_tax_annual_cashflow,
        after_tax_roi,
        expense_breakdown: input.expenses.monthly_breakdown(),
        depreciation,
        tax_impact,
        yearly_tax_projection,
        roi,
        capital_gains,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Investment Analysis (Cash Flow, Tax, Returns)",
        &serde_json::json!({
            "purchase_price": input.purchase_price,
            "rental_income": input.rental_income,
            "notary_fees_rate": notary_fees_rate,
            "tax_regime": tax_regime,
            "tax_bracket": tax_bracket,
            "appreciation_rate": appreciation_rate,
            "investment_period": investment_period,
            "has_loan_data": input.loan_data.is_some(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &InvestmentInput, warnings: &mut Vec<String>) -> ImmoFinanceResult<()> {
    if input.purchase_price < Decimal::ZERO {
        return Err(ImmoFinanceError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price cannot be negative".into(),
        });
    }

    if input.rental_income < Decimal::ZERO {
        return Err(ImmoFinanceError::InvalidInput {
            field: "rental_income".into(),
            reason: "Rental income cannot be negative".into(),
        });
    }

    if let Some(rate) = input.notary_fees_rate {
        if rate < Decimal::ZERO {
            return Err(ImmoFinanceError::InvalidInput {
                field: "notary_fees_rate".into(),
                reason: "Notary fees rate cannot be negative".into(),
            });
        }
        if rate > dec!(0.20) {
            warnings.push(format!(
                "Notary fees rate {rate} is above 20% — rates are decimals (0.08 = 8%), check the input"
            ));
        }
    }

    if let Some(bracket) = input.tax_bracket {
        if bracket < Decimal::ZERO || bracket > dec!(100) {
            return Err(ImmoFinanceError::InvalidInput {
                field: "tax_bracket".into(),
                reason: "Tax bracket is a percentage between 0 and 100".into(),
            });
        }
    }

    if let Some(interest) = input.loan_interest {
        if interest < Decimal::ZERO {
            return Err(ImmoFinanceError::InvalidInput {
                field: "loan_interest".into(),
                reason: "Loan interest cannot be negative".into(),
            });
        }
    }

    if let Some(rate) = input.appreciation_rate {
        if rate <= dec!(-1) {
            return Err(ImmoFinanceError::InvalidInput {
                field: "appreciation_rate".into(),
                reason: "Appreciation rate must be above -100%".into(),
            });
        }
    }

    if input.investment_period == Some(0) {
        return Err(ImmoFinanceError::InvalidInput {
            field: "investment_period".into(),
            reason: "Investment period must be at least 1 year".into(),
        });
    }

    if let Some(loan) = &input.loan_data {
        if loan.term_years == 0 {
            return Err(ImmoFinanceError::InvalidInput {
                field: "loan_data.term_years".into(),
                reason: "Loan term must be at least 1 year".into(),
            });
        }
    }

    let expense_fields = [
        ("expenses.management_fees", input.expenses.management_fees),
        ("expenses.property_tax", input.expenses.property_tax),
        ("expenses.insurance", input.expenses.insurance),
        ("expenses.maintenance", input.expenses.maintenance),
        ("expenses.condo_fees", input.expenses.condo_fees),
        ("expenses.other", input.expenses.other),
        ("expenses.total_monthly", input.expenses.total_monthly),
    ];
    for (field, value) in expense_fields {
        if value < Decimal::ZERO {
            return Err(ImmoFinanceError::InvalidInput {
                field: field.into(),
                reason: "Expense amounts cannot be negative".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
