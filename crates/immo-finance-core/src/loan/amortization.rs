use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ImmoFinanceResult;

/// Residual below which an outstanding balance is treated as fully repaid.
/// Decimal arithmetic leaves a sub-cent remainder on the final payment; the
/// clamp collapses it to exactly zero without touching earlier periods.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, monthly-amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub loan_amount: Money,
    /// Annual interest rate as a decimal (0.03 = 3%)
    pub interest_rate: Rate,
    /// Loan term in whole years
    pub term_years: u32,
}

/// One monthly payment in an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Payment number, 1-indexed
    pub payment_index: u32,
    /// Total payment for the period
    pub payment: Money,
    /// Share of the payment repaying principal
    pub principal_portion: Money,
    /// Share of the payment covering interest
    pub interest_portion: Money,
    /// Balance outstanding after this payment
    pub remaining_balance: Money,
    /// Interest paid through this payment, inclusive
    pub cumulative_interest: Money,
    /// Principal repaid through this payment, inclusive
    pub cumulative_principal: Money,
}

/// Complete payment-by-payment schedule for a loan.
///
/// Serializes as a plain array of entries. Built once by [`generate_schedule`]
/// and read-only afterwards; the yearly accessors never fail, out-of-range
/// years simply contribute zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule {
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total interest over the whole schedule.
    pub fn total_interest(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.cumulative_interest)
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of complete 12-payment years the schedule covers.
    pub fn full_years(&self) -> u32 {
        (self.entries.len() / 12) as u32
    }

    /// Interest paid during loan year `year` (1-indexed). Years without a
    /// full 12-payment block resolve to zero.
    pub fn interest_paid_in_year(&self, year: u32) -> Money {
        self.year_block(year).iter().map(|e| e.interest_portion).sum()
    }

    /// Principal repaid during loan year `year` (1-indexed).
    pub fn principal_paid_in_year(&self, year: u32) -> Money {
        self.year_block(year).iter().map(|e| e.principal_portion).sum()
    }

    fn year_block(&self, year: u32) -> &[AmortizationEntry] {
        if year == 0 {
            return &[];
        }
        let start = (year as usize - 1) * 12;
        let end = year as usize * 12;
        if end > self.entries.len() {
            // Partial years deduct nothing
            return &[];
        }
        &self.entries[start..end]
    }
}

/// Summary metrics for a loan, including its full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanMetrics {
    /// Fixed monthly payment
    pub monthly_payment: Money,
    /// Monthly payment annualized (x12)
    pub annual_payment: Money,
    /// Interest paid over the life of the loan
    pub total_interest: Money,
    /// Principal plus total interest
    pub total_cost: Money,
    /// Echo of the loan terms
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub term_years: u32,
    /// Full payment-by-payment schedule
    pub amortization_schedule: AmortizationSchedule,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment for an amortizing loan:
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate.
///
/// A zero rate degenerates to straight-line repayment (`P / n`), keeping the
/// annuity denominator away from zero.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> ImmoFinanceResult<Money> {
    validate_terms(principal, annual_rate, term_years)?;

    let total_months = term_years * 12;
    let monthly_rate = annual_rate / dec!(12);

    if monthly_rate.is_zero() {
        // Interest-free: straight-line repayment
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound *= Decimal::ONE + monthly_rate;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(ImmoFinanceError::CalculationFailure(format!(
            "annuity denominator vanished for rate {annual_rate} over {total_months} payments"
        )));
    }

    Ok(principal * monthly_rate * compound / denominator)
}

/// Generate the complete payment-by-payment schedule for the given terms.
///
/// Each period charges interest on the running balance and applies the rest
/// of the fixed payment to principal. The closing balance of the final
/// payment is exactly zero.
pub fn generate_schedule(
    principal: Money,
    annual_rate: Rate,
    term_years: u32,
) -> ImmoFinanceResult<AmortizationSchedule> {
    let payment = compute_monthly_payment(principal, annual_rate, term_years)?;

    let total_months = term_years * 12;
    let monthly_rate = annual_rate / dec!(12);

    let mut entries = Vec::with_capacity(total_months as usize);
    let mut remaining = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;

    for payment_index in 1..=total_months {
        let interest_portion = remaining * monthly_rate;
        let principal_portion = payment - interest_portion;

        remaining -= principal_portion;
        if remaining < BALANCE_EPSILON {
            remaining = Decimal::ZERO;
        }

        cumulative_interest += interest_portion;
        cumulative_principal += principal_portion;

        entries.push(AmortizationEntry {
            payment_index,
            payment,
            principal_portion,
            interest_portion,
            remaining_balance: remaining,
            cumulative_interest,
            cumulative_principal,
        });
    }

    Ok(AmortizationSchedule { entries })
}

/// Compute full loan metrics: payment, cost totals and the schedule itself.
///
/// Returns a `ComputationOutput<LoanMetrics>` carrying warnings for unusual
/// rate inputs and computation metadata.
pub fn calculate_loan_metrics(
    input: &LoanInput,
) -> ImmoFinanceResult<ComputationOutput<LoanMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.interest_rate > dec!(0.25) {
        warnings.push(format!(
            "Interest rate {} is above 25% — rates are decimals (0.03 = 3%), check the input",
            input.interest_rate
        ));
    }

    let payment =
        compute_monthly_payment(input.loan_amount, input.interest_rate, input.term_years)?;
    let schedule = generate_schedule(input.loan_amount, input.interest_rate, input.term_years)?;
    let total_interest = schedule.total_interest();

    let output = LoanMetrics {
        monthly_payment: payment,
        annual_payment: payment * dec!(12),
        total_interest,
        total_cost: input.loan_amount + total_interest,
        loan_amount: input.loan_amount,
        interest_rate: input.interest_rate,
        term_years: input.term_years,
        amortization_schedule: schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Loan Amortization (Annuity Method)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(principal: Money, annual_rate: Rate, term_years: u32) -> ImmoFinanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(ImmoFinanceError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }

    if term_years == 0 {
        return Err(ImmoFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if annual_rate < Decimal::ZERO {
        return Err(ImmoFinanceError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
