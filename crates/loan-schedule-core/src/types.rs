use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values in currency units. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Amount in the smallest currency unit (cents), as carried on the wire.
pub type Cents = u32;

/// Annual interest rate in hundredths of a percent (10000 = 100%).
pub type BasisPoints = u16;

/// A loan schedule: principal, annual rate and the dated payments made
/// to each recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Starting principal in cents.
    pub principal: Cents,
    /// Annual interest rate in basis points.
    #[serde(alias = "interest")]
    pub interest_rate_bps: BasisPoints,
    /// Number of parallel payment streams.
    #[serde(alias = "recipients")]
    pub recipient_count: u8,
    /// Payments in strictly ascending date order.
    pub payments: Vec<PaymentEvent>,
}

/// Payments made on one calendar date, one amount per recipient.
///
/// A zero amount means "nothing paid to this recipient on this date".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub date: NaiveDate,
    pub amounts: Vec<Cents>,
}

impl Schedule {
    /// Annual rate as a decimal fraction (500 bps -> 0.05).
    pub fn annual_rate(&self) -> Rate {
        Decimal::from(self.interest_rate_bps) / Decimal::from(10_000)
    }

    /// Starting principal converted from cents to currency units.
    pub fn principal_amount(&self) -> Money {
        cents_to_money(self.principal)
    }
}

/// Convert an amount in cents into currency units.
pub fn cents_to_money(cents: Cents) -> Money {
    Decimal::new(i64::from(cents), 2)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
