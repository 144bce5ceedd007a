pub mod error;
pub mod types;

#[cfg(feature = "codec")]
pub mod codec;

#[cfg(feature = "amortization")]
pub mod amortization;

pub use error::LoanScheduleError;
pub use types::*;

/// Standard result type for all loan-schedule operations
pub type LoanScheduleResult<T> = Result<T, LoanScheduleError>;
