use immo_finance_core::investment::analysis::{analyze_investment, InvestmentInput, LoanData};
use immo_finance_core::investment::depreciation::compute_depreciation;
use immo_finance_core::investment::expenses::ExpenseProfile;
use immo_finance_core::investment::returns::{compute_total_roi, RoiInput};
use immo_finance_core::investment::tax::{compute_tax_impact, TaxRegime};
use immo_finance_core::loan::{calculate_loan_metrics, generate_schedule, LoanInput};
use immo_finance_core::ImmoFinanceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn baseline_expenses() -> ExpenseProfile {
    ExpenseProfile {
        management_fees: dec!(60),
        property_tax: dec!(800),
        insurance: dec!(40),
        maintenance: dec!(50),
        condo_fees: dec!(100),
        other: dec!(30),
        total_monthly: dec!(300),
    }
}

fn baseline_input() -> InvestmentInput {
    InvestmentInput {
        purchase_price: dec!(200000),
        rental_income: dec!(1200),
        expenses: baseline_expenses(),
        notary_fees_rate: None,
        tax_regime: None,
        tax_bracket: None,
        loan_interest: None,
        appreciation_rate: None,
        investment_period: None,
        loan_data: None,
    }
}

// ===========================================================================
// Micro-BIC scenario — known answers
// ===========================================================================

#[test]
fn test_micro_bic_baseline_scenario() {
    // 200k purchase, 1200 rent, 300 monthly charges, all defaults
    let output = analyze_investment(&baseline_input()).unwrap();
    let out = &output.result;

    assert_eq!(out.monthly_cashflow, dec!(900));
    assert_eq!(out.annual_cashflow, dec!(10800));

    // Taxable = 14400 * 50%; tax = 30% + 17.2% of that
    assert_eq!(out.tax_impact.taxable_income, dec!(7200));
    assert_eq!(out.tax_impact.income_tax, dec!(2160));
    assert_eq!(out.tax_impact.social_charges, dec!(1238.4));
    assert_eq!(out.tax_impact.total_tax, dec!(3398.4));
    assert_eq!(out.tax_impact.effective_tax_rate, dec!(23.6));
}

#[test]
fn test_micro_bic_ignores_itemized_deductions() {
    // Same scenario with heavy interest makes no difference under micro-BIC
    let mut with_interest = baseline_input();
    with_interest.loan_interest = Some(dec!(400));

    let base = analyze_investment(&baseline_input()).unwrap();
    let loaded = analyze_investment(&with_interest).unwrap();

    assert_eq!(
        base.result.tax_impact.taxable_income,
        loaded.result.tax_impact.taxable_income
    );
    assert_eq!(
        base.result.tax_impact.total_tax,
        loaded.result.tax_impact.total_tax
    );
}

// ===========================================================================
// Regime reel scenario — deductions and floor
// ===========================================================================

#[test]
fn test_reel_taxable_income_itemized() {
    // Deductions: 4160 expenses + 7520 depreciation => taxable 2720
    let depreciation = compute_depreciation(dec!(200000), dec!(16000));
    let impact = compute_tax_impact(
        dec!(1200),
        &baseline_expenses(),
        TaxRegime::Reel,
        dec!(30),
        dec!(0),
        Some(&depreciation),
    );

    assert_eq!(impact.taxable_income, dec!(2720));
    assert_eq!(impact.income_tax, dec!(816));
    assert_eq!(impact.social_charges, dec!(467.84));
}

#[test]
fn test_reel_with_interest_floors_at_zero() {
    // Adding 4800 of annual interest pushes deductions past the rents
    let depreciation = compute_depreciation(dec!(200000), dec!(16000));
    let impact = compute_tax_impact(
        dec!(1200),
        &baseline_expenses(),
        TaxRegime::Reel,
        dec!(30),
        dec!(400),
        Some(&depreciation),
    );

    assert_eq!(impact.taxable_income, Decimal::ZERO);
    assert_eq!(impact.total_tax, Decimal::ZERO);
    assert_eq!(impact.effective_tax_rate, Decimal::ZERO);
}

#[test]
fn test_reel_taxes_less_than_micro_bic_when_deductions_are_heavy() {
    let mut reel_input = baseline_input();
    reel_input.tax_regime = Some(TaxRegime::Reel);
    reel_input.loan_interest = Some(dec!(400));

    let micro = analyze_investment(&baseline_input()).unwrap();
    let reel = analyze_investment(&reel_input).unwrap();

    assert!(reel.result.tax_impact.total_tax < micro.result.tax_impact.total_tax);
    assert!(reel.result.after_tax_annual_cashflow > micro.result.after_tax_annual_cashflow);
}

// ===========================================================================
// Loan-backed analysis — projection over the term
// ===========================================================================

#[test]
fn test_loan_metrics_feed_analysis() {
    // Typical flow: amortize first, then analyze with the schedule attached
    let loan = calculate_loan_metrics(&LoanInput {
        loan_amount: dec!(160000),
        interest_rate: dec!(0.02),
        term_years: 20,
    })
    .unwrap();

    let mut input = baseline_input();
    input.tax_regime = Some(TaxRegime::Reel);
    input.loan_data = Some(LoanData {
        term_years: 20,
        amortization_schedule: loan.result.amortization_schedule.clone(),
    });

    let output = analyze_investment(&input).unwrap();
    let out = &output.result;

    assert_eq!(out.yearly_tax_projection.len(), 20);

    // Interest deduction in year 1 matches the schedule
    let expected_interest = loan.result.amortization_schedule.interest_paid_in_year(1);
    assert_eq!(out.yearly_tax_projection[0].interest_deduction, expected_interest);

    // Shield shrinks, taxable income rises
    let first = &out.yearly_tax_projection[0];
    let last = &out.yearly_tax_projection[19];
    assert!(first.interest_deduction > last.interest_deduction);
    assert!(first.taxable_income < last.taxable_income);

    // Paydown component reflects year-1 principal over the 216k outlay
    let year1_principal = loan.result.amortization_schedule.principal_paid_in_year(1);
    let expected_paydown = year1_principal / dec!(216000) * dec!(100);
    assert_eq!(out.roi.principal_paydown_roi, expected_paydown);
}

#[test]
fn test_roi_components_decompose_total() {
    let schedule = generate_schedule(dec!(160000), dec!(0.02), 20).unwrap();
    let depreciation = compute_depreciation(dec!(200000), dec!(16000));

    let roi = compute_total_roi(&RoiInput {
        annual_cashflow: dec!(10800),
        total_investment: dec!(216000),
        purchase_price: dec!(200000),
        appreciation_rate: Some(dec!(0.02)),
        annual_principal_paid: Some(schedule.principal_paid_in_year(1)),
        tax_regime: TaxRegime::Reel,
        tax_bracket: Some(dec!(30)),
        depreciation: Some(depreciation),
    });

    assert_eq!(
        roi.total_roi,
        roi.cash_flow_roi + roi.principal_paydown_roi + roi.appreciation_roi
            + roi.tax_benefits_roi
    );
    assert_eq!(roi.equity_roi, roi.principal_paydown_roi + roi.appreciation_roi);

    // Every component is positive in this leveraged reel setup
    assert!(roi.cash_flow_roi > Decimal::ZERO);
    assert!(roi.principal_paydown_roi > Decimal::ZERO);
    assert!(roi.appreciation_roi > Decimal::ZERO);
    assert!(roi.tax_benefits_roi > Decimal::ZERO);
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_zero_investment_roi_is_zero_not_error() {
    let mut input = baseline_input();
    input.purchase_price = dec!(0);

    let output = analyze_investment(&input).unwrap();
    let out = &output.result;

    assert_eq!(out.roi.total_roi, Decimal::ZERO);
    assert_eq!(out.after_tax_roi, Decimal::ZERO);
    assert_eq!(out.capital_gains.future_value, Decimal::ZERO);
}

#[test]
fn test_zero_rent_zero_effective_rate() {
    let mut input = baseline_input();
    input.rental_income = dec!(0);

    let output = analyze_investment(&input).unwrap();
    let out = &output.result;

    assert_eq!(out.tax_impact.taxable_income, Decimal::ZERO);
    assert_eq!(out.tax_impact.effective_tax_rate, Decimal::ZERO);

    // Holding costs still show up as negative cash flow
    assert_eq!(out.monthly_cashflow, dec!(-300));
}

#[test]
fn test_invalid_inputs_are_rejected_with_field_names() {
    let mut negative_rent = baseline_input();
    negative_rent.rental_income = dec!(-10);
    let err = analyze_investment(&negative_rent).unwrap_err();
    assert!(matches!(
        err,
        ImmoFinanceError::InvalidInput { field, .. } if field == "rental_income"
    ));

    let mut bad_bracket = baseline_input();
    bad_bracket.tax_bracket = Some(dec!(-5));
    let err = analyze_investment(&bad_bracket).unwrap_err();
    assert!(matches!(
        err,
        ImmoFinanceError::InvalidInput { field, .. } if field == "tax_bracket"
    ));
}

// ===========================================================================
// Defaults and supplements
// ===========================================================================

#[test]
fn test_defaults_match_documented_values() {
    let output = analyze_investment(&baseline_input()).unwrap();
    let out = &output.result;

    // 8% notary, micro-BIC, 10-year horizon, 2% appreciation
    assert_eq!(out.purchase_costs.notary_fees, dec!(16000));
    assert_eq!(out.tax_regime, TaxRegime::MicroBic);
    assert_eq!(out.yearly_tax_projection.len(), 10);

    // 200000 * 1.02^10 => ~243798.88
    assert!(out.capital_gains.future_value > dec!(243798));
    assert!(out.capital_gains.future_value < dec!(243800));
}

#[test]
fn test_expense_breakdown_spreads_annual_property_tax() {
    let output = analyze_investment(&baseline_input()).unwrap();
    let breakdown = &output.result.expense_breakdown;

    assert_eq!(breakdown.property_tax * dec!(12), dec!(800));
    assert_eq!(breakdown.total_monthly, dec!(300));
}

#[test]
fn test_depreciation_components_in_analysis() {
    let output = analyze_investment(&baseline_input()).unwrap();
    let depreciation = &output.result.depreciation;

    assert_eq!(depreciation.building, dec!(3200));
    assert_eq!(depreciation.notary_fees, dec!(320));
    assert_eq!(depreciation.furniture, dec!(4000));
    assert_eq!(depreciation.total, dec!(7520));
}

#[test]
fn test_analysis_envelope_metadata() {
    let output = analyze_investment(&baseline_input()).unwrap();

    assert_eq!(
        output.methodology,
        "Rental Investment Analysis (Cash Flow, Tax, Returns)"
    );
    assert_eq!(output.metadata.precision, "rust_decimal_128bit");
    assert!(output.assumptions.get("tax_regime").is_some());
}
