use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::investment::depreciation::DepreciationProfile;
use crate::investment::expenses::ExpenseProfile;
use crate::loan::AmortizationSchedule;
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Flat abattement applied to gross annual rents under micro-BIC.
pub const MICRO_BIC_ABATTEMENT: Decimal = dec!(0.50);

/// Prelevements sociaux rate applied to taxable rental income.
pub const SOCIAL_CHARGES_RATE: Decimal = dec!(0.172);

/// Marginal income tax bracket assumed when none is supplied, in percent.
pub const DEFAULT_TAX_BRACKET: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// French rental income tax regimes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Flat-rate regime: 50% abattement on gross rents, no expense detail
    #[default]
    MicroBic,
    /// Itemized regime: actual expenses, depreciation and loan interest
    /// are all deductible
    Reel,
}

/// Tax outcome for one year of rental income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxImpact {
    /// Annual income subject to tax after regime deductions, floored at zero
    pub taxable_income: Money,
    /// Income tax at the marginal bracket
    pub income_tax: Money,
    /// Social charges at the fixed 17.2% rate
    pub social_charges: Money,
    /// Income tax plus social charges
    pub total_tax: Money,
    /// Total tax as a percentage of gross annual rents; zero when there is
    /// no rental income
    pub effective_tax_rate: Percent,
}

/// One projected tax year.
///
/// Under the regime reel the interest deduction is that year's actual
/// schedule interest, so the tax shield shrinks as the loan amortizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyTaxProjection {
    /// Projection year, 1-indexed
    pub year: u32,
    /// Loan interest deducted this year
    pub interest_deduction: Money,
    pub taxable_income: Money,
    pub income_tax: Money,
    pub social_charges: Money,
    pub total_tax: Money,
    pub effective_tax_rate: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tax impact of one year of rents under the selected regime.
///
/// `monthly_loan_interest` is a flat monthly figure; `depreciation` feeds the
/// regime reel deduction and is ignored under micro-BIC. The tax bracket is a
/// percentage (30 = 30%), unlike the decimal rates everywhere else.
pub fn compute_tax_impact(
    rental_income: Money,
    expenses: &ExpenseProfile,
    regime: TaxRegime,
    tax_bracket: Decimal,
    monthly_loan_interest: Money,
    depreciation: Option<&DepreciationProfile>,
) -> TaxImpact {
    let annual_rental_income = rental_income * dec!(12);

    let taxable_income = match regime {
        TaxRegime::MicroBic => annual_rental_income * (Decimal::ONE - MICRO_BIC_ABATTEMENT),
        TaxRegime::Reel => reel_taxable_income(
            annual_rental_income,
            expenses,
            monthly_loan_interest * dec!(12),
            depreciation,
        ),
    };

    apply_tax_rates(annual_rental_income, taxable_income, tax_bracket)
}

/// Year-by-year tax projection over `projection_years`.
///
/// Micro-BIC years are all identical. Regime reel years deduct the interest
/// actually paid that year per the amortization schedule; years past the end
/// of the schedule (or any year when no schedule is given) deduct nothing.
pub fn compute_yearly_tax_projection(
    rental_income: Money,
    expenses: &ExpenseProfile,
    schedule: Option<&AmortizationSchedule>,
    projection_years: u32,
    regime: TaxRegime,
    tax_bracket: Decimal,
    depreciation: Option<&DepreciationProfile>,
) -> Vec<YearlyTaxProjection> {
    let annual_rental_income = rental_income * dec!(12);
    let mut projection = Vec::with_capacity(projection_years as usize);

    for year in 1..=projection_years {
        let (interest_deduction, taxable_income) = match regime {
            TaxRegime::MicroBic => (
                Decimal::ZERO,
                annual_rental_income * (Decimal::ONE - MICRO_BIC_ABATTEMENT),
            ),
            TaxRegime::Reel => {
                let interest = schedule
                    .map(|s| s.interest_paid_in_year(year))
                    .unwrap_or(Decimal::ZERO);
                let taxable = reel_taxable_income(
                    annual_rental_income,
                    expenses,
                    interest,
                    depreciation,
                );
                (interest, taxable)
            }
        };

        let impact = apply_tax_rates(annual_rental_income, taxable_income, tax_bracket);

        projection.push(YearlyTaxProjection {
            year,
            interest_deduction,
            taxable_income: impact.taxable_income,
            income_tax: impact.income_tax,
            social_charges: impact.social_charges,
            total_tax: impact.total_tax,
            effective_tax_rate: impact.effective_tax_rate,
        });
    }

    projection
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Regime reel taxable income: rents less expenses, depreciation and loan
/// interest, floored at zero (the deficit carry-forward is out of scope).
fn reel_taxable_income(
    annual_rental_income: Money,
    expenses: &ExpenseProfile,
    annual_loan_interest: Money,
    depreciation: Option<&DepreciationProfile>,
) -> Money {
    let depreciation_total = depreciation.map(|d| d.total).unwrap_or(Decimal::ZERO);
    let deductions = expenses.annual_total() + depreciation_total + annual_loan_interest;
    (annual_rental_income - deductions).max(Decimal::ZERO)
}

/// Apply the marginal bracket and social charges to a taxable figure.
fn apply_tax_rates(
    annual_rental_income: Money,
    taxable_income: Money,
    tax_bracket: Decimal,
) -> TaxImpact {
    let income_tax = taxable_income * tax_bracket / dec!(100);
    let social_charges = taxable_income * SOCIAL_CHARGES_RATE;
    let total_tax = income_tax + social_charges;

    let effective_tax_rate = if annual_rental_income.is_zero() {
        Decimal::ZERO
    } else {
        total_tax / annual_rental_income * dec!(100)
    };

    TaxImpact {
        taxable_income,
        income_tax,
        social_charges,
        total_tax,
        effective_tax_rate,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::depreciation::compute_depreciation;
    use crate::loan::generate_schedule;
    use rust_decimal_macros::dec;

    /// Itemized charges worth 4160/year
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

    // --- Micro-BIC Tests ---

    #[test]
    fn test_micro_bic_halves_gross_rents() {
        let impact = compute_tax_impact(
            dec!(1200),
            &sample_expenses(),
            TaxRegime::MicroBic,
            dec!(30),
            dec!(400),
            None,
        );

        // 14400 * 0.5; expenses and interest are ignored
        assert_eq!(impact.taxable_income, dec!(7200));
        assert_eq!(impact.income_tax, dec!(2160));
        assert_eq!(impact.social_charges, dec!(1238.4));
        assert_eq!(impact.total_tax, dec!(3398.4));
        assert_eq!(impact.effective_tax_rate, dec!(23.6));
    }

    #[test]
    fn test_micro_bic_zero_income_means_zero_effective_rate() {
        let impact = compute_tax_impact(
            dec!(0),
            &ExpenseProfile::default(),
            TaxRegime::MicroBic,
            dec!(30),
            dec!(0),
            None,
        );

        assert_eq!(impact.taxable_income, Decimal::ZERO);
        assert_eq!(impact.total_tax, Decimal::ZERO);
        assert_eq!(impact.effective_tax_rate, Decimal::ZERO);
    }

    // --- Regime Reel Tests ---

    #[test]
    fn test_reel_deducts_expenses_and_depreciation() {
        let depreciation = compute_depreciation(dec!(200000), dec!(16000));
        let impact = compute_tax_impact(
            dec!(1200),
            &sample_expenses(),
            TaxRegime::Reel,
            dec!(30),
            dec!(0),
            Some(&depreciation),
        );

        // 14400 - 4160 - 7520 = 2720
        assert_eq!(impact.taxable_income, dec!(2720));
        assert_eq!(impact.income_tax, dec!(816));
        assert_eq!(impact.social_charges, dec!(467.84));
        assert_eq!(impact.total_tax, dec!(1283.84));
    }

    #[test]
    fn test_reel_floors_taxable_income_at_zero() {
        let depreciation = compute_depreciation(dec!(200000), dec!(16000));
        let impact = compute_tax_impact(
            dec!(1200),
            &sample_expenses(),
            TaxRegime::Reel,
            dec!(30),
            dec!(400),
            Some(&depreciation),
        );

        // 14400 - 4160 - 7520 - 4800 is negative, floored
        assert_eq!(impact.taxable_income, Decimal::ZERO);
        assert_eq!(impact.total_tax, Decimal::ZERO);
        assert_eq!(impact.effective_tax_rate, Decimal::ZERO);
    }

    #[test]
    fn test_reel_beats_micro_bic_with_heavy_deductions() {
        let depreciation = compute_depreciation(dec!(200000), dec!(16000));
        let micro = compute_tax_impact(
            dec!(1200),
            &sample_expenses(),
            TaxRegime::MicroBic,
            dec!(30),
            dec!(400),
            Some(&depreciation),
        );
        let reel = compute_tax_impact(
            dec!(1200),
            &sample_expenses(),
            TaxRegime::Reel,
            dec!(30),
            dec!(400),
            Some(&depreciation),
        );

        assert!(reel.taxable_income < micro.taxable_income);
        assert!(reel.total_tax < micro.total_tax);
    }

    // --- Projection Tests ---

    #[test]
    fn test_micro_bic_projection_is_flat() {
        let projection = compute_yearly_tax_projection(
            dec!(1200),
            &sample_expenses(),
            None,
            10,
            TaxRegime::MicroBic,
            dec!(30),
            None,
        );

        assert_eq!(projection.len(), 10);
        assert_eq!(projection[0].year, 1);
        assert_eq!(projection[9].year, 10);
        for year in &projection {
            assert_eq!(year.interest_deduction, Decimal::ZERO);
            assert_eq!(year.taxable_income, dec!(7200));
            assert_eq!(year.total_tax, dec!(3398.4));
        }
    }

    #[test]
    fn test_reel_projection_interest_shield_shrinks() {
        let schedule = generate_schedule(dec!(150000), dec!(0.02), 15).unwrap();
        let projection = compute_yearly_tax_projection(
            dec!(1200),
            &sample_expenses(),
            Some(&schedule),
            15,
            TaxRegime::Reel,
            dec!(30),
            None,
        );

        assert_eq!(projection.len(), 15);

        // Interest declines as the loan amortizes, so taxable income rises
        assert!(projection[0].interest_deduction > projection[14].interest_deduction);
        assert!(projection[0].taxable_income < projection[14].taxable_income);

        // Year 1 interest on 150k at 2% is just under 3000
        assert!(projection[0].interest_deduction > dec!(2700));
        assert!(projection[0].interest_deduction < dec!(3000));
    }

    #[test]
    fn test_reel_projection_without_schedule_deducts_no_interest() {
        let projection = compute_yearly_tax_projection(
            dec!(1200),
            &sample_expenses(),
            None,
            5,
            TaxRegime::Reel,
            dec!(30),
            None,
        );

        for year in &projection {
            assert_eq!(year.interest_deduction, Decimal::ZERO);
            // 14400 - 4160
            assert_eq!(year.taxable_income, dec!(10240));
        }
    }

    #[test]
    fn test_reel_projection_past_schedule_end() {
        let schedule = generate_schedule(dec!(150000), dec!(0.02), 5).unwrap();
        let projection = compute_yearly_tax_projection(
            dec!(1200),
            &sample_expenses(),
            Some(&schedule),
            8,
            TaxRegime::Reel,
            dec!(30),
            None,
        );

        // Years 6-8 fall outside the 60-payment schedule
        assert!(projection[4].interest_deduction > Decimal::ZERO);
        assert_eq!(projection[5].interest_deduction, Decimal::ZERO);
        assert_eq!(projection[7].interest_deduction, Decimal::ZERO);
    }
}
