pub mod error;
pub mod investment;
pub mod loan;
pub mod types;

pub use error::ImmoFinanceError;
pub use types::*;

/// Standard result type for all immo-finance operations
pub type ImmoFinanceResult<T> = Result<T, ImmoFinanceError>;
