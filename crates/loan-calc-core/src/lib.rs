pub mod engine;
pub mod error;
pub mod types;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "chart")]
pub mod chart;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
