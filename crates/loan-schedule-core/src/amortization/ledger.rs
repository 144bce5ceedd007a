use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// What a ledger row represents. Serialized as the renderer's row tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Opening principal, before any payment.
    Start,
    /// Payments on one date plus that day's simple interest.
    Payment,
    /// Compound interest over days with no payment.
    Gap,
    /// Per-recipient totals, accumulated interest and closing principal.
    Total,
}

/// One line of the amortization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub kind: RowKind,
    /// ISO date, `"<start> - <end>"` for multi-day gaps, `"Total"`, or empty
    /// for the start row.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// One cell per recipient; `None` renders blank.
    pub payments: Vec<Option<Money>>,
    /// Interest accrued by this row; `None` on the start row.
    pub interest: Option<Money>,
    /// Principal after this row.
    pub balance: Money,
    /// True for rows dated strictly after the `as_of` cut-off.
    pub projected: bool,
}

/// The full amortization ledger and its closing totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
    pub recipient_count: u8,
    pub opening_principal: Money,
    pub daily_rate: Rate,
    pub totals_by_recipient: Vec<Money>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub final_principal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl Ledger {
    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &LedgerRow> + '_ {
        self.rows.iter().filter(move |r| r.kind == kind)
    }
}
