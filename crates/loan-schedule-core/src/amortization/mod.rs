pub mod generate;
pub mod ledger;
pub mod totals;

pub use generate::{amortize, generate, AmortizationInput, DAYS_IN_YEAR};
pub use ledger::{Ledger, LedgerRow, RowKind};
pub use totals::RunningTotals;
