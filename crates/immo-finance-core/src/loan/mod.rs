//! Fixed-rate loan mechanics: monthly payment, amortization schedule, totals.

pub mod amortization;

pub use amortization::{
    calculate_loan_metrics, compute_monthly_payment, generate_schedule, AmortizationEntry,
    AmortizationSchedule, LoanInput, LoanMetrics,
};
