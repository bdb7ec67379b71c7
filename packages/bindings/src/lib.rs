use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_metrics(input_json: String) -> NapiResult<String> {
    let input: immo_finance_core::loan::amortization::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = immo_finance_core::loan::amortization::calculate_loan_metrics(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: immo_finance_core::investment::analysis::InvestmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = immo_finance_core::investment::analysis::analyze_investment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
