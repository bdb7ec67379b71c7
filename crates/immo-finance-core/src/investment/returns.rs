use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::investment::depreciation::DepreciationProfile;
use crate::investment::tax::{TaxRegime, DEFAULT_TAX_BRACKET};
use crate::types::{Money, Percent, Rate};

/// Annual property appreciation assumed when the caller supplies none.
pub const DEFAULT_APPRECIATION_RATE: Decimal = dec!(0.02);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for the total-return decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// Pre-tax annual cash flow (year 1)
    pub annual_cashflow: Money,
    /// All-in acquisition cost: the denominator for every component
    pub total_investment: Money,
    /// Sale price, the basis for appreciation
    pub purchase_price: Money,
    /// Annual appreciation as a decimal; defaults to 2%
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appreciation_rate: Option<Rate>,
    /// Principal repaid during the first loan year; zero without a loan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_principal_paid: Option<Money>,
    /// Tax regime driving the tax-benefit component
    pub tax_regime: TaxRegime,
    /// Marginal bracket in percent; defaults to 30
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_bracket: Option<Decimal>,
    /// Depreciation backing the regime reel tax shield
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation: Option<DepreciationProfile>,
}

/// First-year total return decomposed into its sources, each expressed as a
/// percentage of the acquisition cost. The four components sum to
/// `total_roi`; ratios over a zero investment resolve to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiBreakdown {
    /// Pre-tax cash flow over acquisition cost
    pub cash_flow_roi: Percent,
    /// First-year principal paydown over acquisition cost
    pub principal_paydown_roi: Percent,
    /// First-year appreciation over acquisition cost
    pub appreciation_roi: Percent,
    /// Principal paydown plus appreciation: wealth built without cash flow
    pub equity_roi: Percent,
    /// Depreciation tax shield at the marginal bracket; zero under micro-BIC
    pub tax_benefits_roi: Percent,
    /// Sum of the cash-flow, paydown, appreciation and tax-benefit components
    pub total_roi: Percent,
}

/// Projected resale value after a holding period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalGainsProjection {
    /// Property value at the end of the holding period
    pub future_value: Money,
    /// Future value less today's purchase price
    pub capital_gains: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decompose the first-year total return on an investment.
///
/// The tax-benefit component only exists under the regime reel, where the
/// depreciation deduction shields income at the marginal bracket; micro-BIC
/// already prices its abattement into the cash-flow numbers.
pub fn compute_total_roi(input: &RoiInput) -> RoiBreakdown {
    let appreciation_rate = input.appreciation_rate.unwrap_or(DEFAULT_APPRECIATION_RATE);
    let tax_bracket = input.tax_bracket.unwrap_or(DEFAULT_TAX_BRACKET);
    let annual_principal_paid = input.annual_principal_paid.unwrap_or(Decimal::ZERO);

    let cash_flow_roi = pct_of(input.annual_cashflow, input.total_investment);
    let principal_paydown_roi = pct_of(annual_principal_paid, input.total_investment);
    let appreciation_roi = pct_of(
        input.purchase_price * appreciation_rate,
        input.total_investment,
    );

    let tax_benefits_roi = match input.tax_regime {
        TaxRegime::Reel => {
            let shield = input
                .depreciation
                .as_ref()
                .map(|d| d.total * tax_bracket / dec!(100))
                .unwrap_or(Decimal::ZERO);
            pct_of(shield, input.total_investment)
        }
        TaxRegime::MicroBic => Decimal::ZERO,
    };

    RoiBreakdown {
        cash_flow_roi,
        principal_paydown_roi,
        appreciation_roi,
        equity_roi: principal_paydown_roi + appreciation_roi,
        tax_benefits_roi,
        total_roi: cash_flow_roi + principal_paydown_roi + appreciation_roi + tax_benefits_roi,
    }
}

/// Compound the purchase price at the appreciation rate over the holding
/// period.
pub fn project_capital_gains(
    purchase_price: Money,
    appreciation_rate: Rate,
    holding_years: u32,
) -> CapitalGainsProjection {
    let growth = (Decimal::ONE + appreciation_rate).powi(holding_years as i64);
    let future_value = purchase_price * growth;

    CapitalGainsProjection {
        future_value,
        capital_gains: future_value - purchase_price,
    }
}

/// Amount as a percentage of base; zero-base ratios resolve to zero.
fn pct_of(amount: Money, base: Money) -> Percent {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        amount / base * dec!(100)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
