use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::ledger::{Ledger, LedgerRow, RowKind};
use super::totals::RunningTotals;
use crate::error::LoanScheduleError;
use crate::types::*;
use crate::LoanScheduleResult;

/// Fixed day count for the daily rate. Leap years are not adjusted for.
pub const DAYS_IN_YEAR: u32 = 365;

/// Input for an amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub schedule: Schedule,
    /// Payments dated on or before this day are realized, later ones
    /// projected, each group followed by its own total row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// Build the day-by-day ledger for a schedule.
///
/// `payments` must be non-empty and strictly ascending by date. Gap rows
/// compound interest daily across days without payments; payment rows add a
/// single day of simple interest after the payments are applied.
pub fn generate(schedule: &Schedule, as_of: Option<NaiveDate>) -> LoanScheduleResult<Ledger> {
    if schedule.payments.is_empty() {
        return Err(LoanScheduleError::InsufficientData(
            "Amortization requires at least one payment".into(),
        ));
    }

    let recipients = schedule.recipient_count as usize;
    let daily_rate = schedule.annual_rate() / Decimal::from(DAYS_IN_YEAR);
    let opening = schedule.principal_amount();
    let mut totals = RunningTotals::new(opening, schedule.recipient_count, daily_rate);

    // start row + payment rows + worst case one gap per payment + two totals
    let mut rows = Vec::with_capacity(2 * schedule.payments.len() + 3);
    rows.push(LedgerRow {
        kind: RowKind::Start,
        label: String::new(),
        start_date: None,
        end_date: None,
        payments: vec![None; recipients],
        interest: None,
        balance: opening,
        projected: false,
    });

    let mut in_projected = false;

    for (i, event) in schedule.payments.iter().enumerate() {
        let projected = as_of.is_some_and(|cutoff| event.date > cutoff);
        if projected && !in_projected {
            if i > 0 {
                rows.push(total_row(&totals, false));
            }
            in_projected = true;
        }

        if let Some(last) = totals.last_payment_date {
            if event.date <= last {
                return Err(LoanScheduleError::InvalidInput {
                    field: format!("payments[{i}].date"),
                    reason: format!(
                        "{} does not follow the previous payment on {last}",
                        event.date
                    ),
                });
            }
            if let Some(gap) = gap_row(&mut totals, last, event.date, recipients, projected)? {
                rows.push(gap);
            }
        }

        let cells = totals.apply_payment(event)?;
        let interest = totals.accrue_day()?;
        rows.push(LedgerRow {
            kind: RowKind::Payment,
            label: event.date.to_string(),
            start_date: Some(event.date),
            end_date: Some(event.date),
            payments: cells,
            interest: Some(interest),
            balance: totals.principal,
            projected,
        });
    }

    rows.push(total_row(&totals, in_projected));

    Ok(Ledger {
        rows,
        recipient_count: schedule.recipient_count,
        opening_principal: opening,
        daily_rate,
        total_paid: totals.by_recipient.iter().copied().sum(),
        totals_by_recipient: totals.by_recipient,
        total_interest: totals.total_interest,
        final_principal: totals.principal,
        as_of,
    })
}

/// Compound interest over `last+1 ..= date-1`, or `None` when the payment
/// falls on the day right after the previous one.
fn gap_row(
    totals: &mut RunningTotals,
    last: NaiveDate,
    date: NaiveDate,
    recipients: usize,
    projected: bool,
) -> LoanScheduleResult<Option<LedgerRow>> {
    let next_day = last
        .succ_opt()
        .ok_or_else(|| LoanScheduleError::DateError(format!("no day after {last}")))?;
    if next_day == date {
        return Ok(None);
    }
    let day_before = date
        .pred_opt()
        .ok_or_else(|| LoanScheduleError::DateError(format!("no day before {date}")))?;

    let days = (day_before - last).num_days() as u64;
    let interest = totals.accrue_compound(days)?;

    let label = if next_day == day_before {
        next_day.to_string()
    } else {
        format!("{next_day} - {day_before}")
    };

    Ok(Some(LedgerRow {
        kind: RowKind::Gap,
        label,
        start_date: Some(next_day),
        end_date: Some(day_before),
        payments: vec![None; recipients],
        interest: Some(interest),
        balance: totals.principal,
        projected,
    }))
}

fn total_row(totals: &RunningTotals, projected: bool) -> LedgerRow {
    LedgerRow {
        kind: RowKind::Total,
        label: "Total".into(),
        start_date: None,
        end_date: None,
        payments: totals.recipient_cells(),
        interest: Some(totals.total_interest),
        balance: totals.principal,
        projected,
    }
}

/// Run [`generate`] and wrap the ledger with metadata and warnings.
pub fn amortize(input: &AmortizationInput) -> LoanScheduleResult<ComputationOutput<Ledger>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let schedule = &input.schedule;

    for (i, event) in schedule.payments.iter().enumerate() {
        let n = event.amounts.len();
        let expected = schedule.recipient_count as usize;
        if n < expected {
            warnings.push(format!(
                "Payment {i} ({}) has {n} amount(s) for {expected} recipient(s); missing amounts treated as 0",
                event.date
            ));
        } else if n > expected {
            warnings.push(format!(
                "Payment {i} ({}) has {n} amount(s) for {expected} recipient(s); extra amounts ignored",
                event.date
            ));
        }
    }

    let ledger = generate(schedule, input.as_of)?;

    if let Some(row) = ledger
        .rows
        .iter()
        .find(|r| r.kind == RowKind::Payment && r.balance.is_sign_negative())
    {
        warnings.push(format!(
            "Principal becomes negative on {}; the loan is overpaid",
            row.label
        ));
    }
    if let Some(cutoff) = input.as_of {
        if !ledger.rows.iter().any(|r| r.projected) {
            warnings.push(format!("No payments are projected after {cutoff}"));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Daily amortization: compound interest across gaps, one day of simple interest per payment date, 365-day year",
        &serde_json::json!({
            "principal": schedule.principal_amount().to_string(),
            "annual_rate": schedule.annual_rate().to_string(),
            "daily_rate": ledger.daily_rate.to_string(),
            "recipients": schedule.recipient_count,
            "payments": schedule.payments.len(),
            "as_of": input.as_of,
        }),
        warnings,
        elapsed,
        ledger,
    ))
}
