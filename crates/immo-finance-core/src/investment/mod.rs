//! Rental property investment analysis: acquisition costs, cash flow,
//! French tax regimes, return decomposition and capital gains.

pub mod acquisition;
pub mod analysis;
pub mod depreciation;
pub mod expenses;
pub mod returns;
pub mod tax;

pub use analysis::{analyze_investment, AnalysisResult, InvestmentInput, LoanData};
pub use tax::TaxRegime;
