use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Operating expenses for a rental property.
///
/// All fields are monthly amounts except `property_tax`, which follows the
/// annual taxe fonciere billing cycle. Absent fields default to zero, so
/// callers only supply the charges they actually have.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseProfile {
    /// Monthly agency / management fees
    #[serde(default)]
    pub management_fees: Money,
    /// Annual property tax (taxe fonciere)
    #[serde(default)]
    pub property_tax: Money,
    /// Monthly landlord insurance
    #[serde(default)]
    pub insurance: Money,
    /// Monthly maintenance provision
    #[serde(default)]
    pub maintenance: Money,
    /// Monthly co-ownership charges
    #[serde(default)]
    pub condo_fees: Money,
    /// Other monthly charges
    #[serde(default)]
    pub other: Money,
    /// Total monthly outflow used for cash-flow purposes, supplied by the
    /// caller and taken as-is
    #[serde(default)]
    pub total_monthly: Money,
}

/// Monthly view of an expense profile, with the annual property tax spread
/// over twelve months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyExpenseBreakdown {
    pub management_fees: Money,
    /// One twelfth of the annual property tax
    pub property_tax: Money,
    pub insurance: Money,
    pub maintenance: Money,
    pub condo_fees: Money,
    pub other: Money,
    pub total_monthly: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl ExpenseProfile {
    /// Deductible annual total: monthly fields x12, property tax as-is.
    pub fn annual_total(&self) -> Money {
        (self.management_fees + self.insurance + self.maintenance + self.condo_fees + self.other)
            * dec!(12)
            + self.property_tax
    }

    /// Per-month breakdown for reporting.
    pub fn monthly_breakdown(&self) -> MonthlyExpenseBreakdown {
        MonthlyExpenseBreakdown {
            management_fees: self.management_fees,
            property_tax: self.property_tax / dec!(12),
            insurance: self.insurance,
            maintenance: self.maintenance,
            condo_fees: self.condo_fees,
            other: self.other,
            total_monthly: self.total_monthly,
        }
    }
}

/// Monthly cash flow before tax: rent minus the expense total. A negative
/// result is meaningful (the property costs money to hold), so no floor.
pub fn compute_monthly_cashflow(rental_income: Money, expenses: &ExpenseProfile) -> Money {
    rental_income - expenses.total_monthly
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_expenses() -> ExpenseProfile {
        ExpenseProfile {
            management_fees: dec!(60),
            property_tax: dec!(800),
            insurance: dec!(40),
            maintenance: dec!(50),
            condo_fees: dec!(100),
            other: dec!(30),
            total_monthly: dec!(346.67),
        }
    }

    #[test]
    fn test_annual_total_mixes_monthly_and_annual_fields() {
        let expenses = sample_expenses();

        // (60 + 40 + 50 + 100 + 30) * 12 + 800 = 3360 + 800
        assert_eq!(expenses.annual_total(), dec!(4160));
    }

    #[test]
    fn test_monthly_breakdown_spreads_property_tax() {
        let breakdown = sample_expenses().monthly_breakdown();
        assert_eq!(breakdown.property_tax * dec!(12), dec!(800));
        assert_eq!(breakdown.management_fees, dec!(60));
        assert_eq!(breakdown.total_monthly, dec!(346.67));
    }

    #[test]
    fn test_monthly_cashflow_subtracts_total() {
        let expenses = ExpenseProfile {
            total_monthly: dec!(300),
            ..Default::default()
        };
        assert_eq!(compute_monthly_cashflow(dec!(1200), &expenses), dec!(900));
    }

    #[test]
    fn test_monthly_cashflow_can_be_negative() {
        let expenses = ExpenseProfile {
            total_monthly: dec!(1500),
            ..Default::default()
        };
        assert_eq!(compute_monthly_cashflow(dec!(1200), &expenses), dec!(-300));
    }

    #[test]
    fn test_default_profile_is_all_zero() {
        let expenses = ExpenseProfile::default();
        assert_eq!(expenses.annual_total(), Decimal::ZERO);
        assert_eq!(compute_monthly_cashflow(dec!(1200), &expenses), dec!(1200));
    }
}
