use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use crate::error::LoanScheduleError;
use crate::types::*;
use crate::LoanScheduleResult;

/// Mutable accumulator threaded through one amortization pass.
///
/// Starts from the schedule's principal and only moves forward: payments
/// reduce the balance, interest accrues onto it, and per-recipient totals
/// only grow.
#[derive(Debug, Clone, Serialize)]
pub struct RunningTotals {
    pub principal: Money,
    pub total_interest: Money,
    pub by_recipient: Vec<Money>,
    pub last_payment_date: Option<NaiveDate>,
    pub daily_rate: Rate,
}

impl RunningTotals {
    pub fn new(principal: Money, recipient_count: u8, daily_rate: Rate) -> Self {
        Self {
            principal,
            total_interest: Decimal::ZERO,
            by_recipient: vec![Decimal::ZERO; recipient_count as usize],
            last_payment_date: None,
            daily_rate,
        }
    }

    /// Subtract each nonzero amount from the principal and credit it to its
    /// recipient. Returns the row cells: `None` where nothing was paid.
    pub fn apply_payment(&mut self, event: &PaymentEvent) -> LoanScheduleResult<Vec<Option<Money>>> {
        let mut cells = Vec::with_capacity(self.by_recipient.len());
        for (i, total) in self.by_recipient.iter_mut().enumerate() {
            let cents = event.amounts.get(i).copied().unwrap_or(0);
            if cents == 0 {
                cells.push(None);
                continue;
            }
            let amount = cents_to_money(cents);
            self.principal = self.principal.checked_sub(amount).ok_or_else(|| {
                LoanScheduleError::ArithmeticOverflow(format!(
                    "paying {amount} on {} against principal {}",
                    event.date, self.principal
                ))
            })?;
            *total = total.checked_add(amount).ok_or_else(|| {
                LoanScheduleError::ArithmeticOverflow(format!(
                    "crediting {amount} to recipient {i} on {}",
                    event.date
                ))
            })?;
            cells.push(Some(amount));
        }
        self.last_payment_date = Some(event.date);
        Ok(cells)
    }

    /// One day of simple interest on the current principal.
    pub fn accrue_day(&mut self) -> LoanScheduleResult<Money> {
        let interest = self.principal.checked_mul(self.daily_rate).ok_or_else(|| {
            LoanScheduleError::ArithmeticOverflow(format!(
                "one day of interest on {} at daily rate {}",
                self.principal, self.daily_rate
            ))
        })?;
        self.add_interest(interest)
    }

    /// `days` of daily-compounded interest on the current principal:
    /// `P × ((1 + r)^days − 1)`.
    pub fn accrue_compound(&mut self, days: u64) -> LoanScheduleResult<Money> {
        let overflow = || LoanScheduleError::ArithmeticOverflow(format!(
            "compounding {} at daily rate {} over {days} days",
            self.principal, self.daily_rate
        ));
        let factor = (Decimal::ONE + self.daily_rate)
            .checked_powu(days)
            .ok_or_else(overflow)?;
        let interest = self
            .principal
            .checked_mul(factor)
            .and_then(|grown| grown.checked_sub(self.principal))
            .ok_or_else(overflow)?;
        self.add_interest(interest)
    }

    /// Both sums are checked before either is stored.
    fn add_interest(&mut self, interest: Money) -> LoanScheduleResult<Money> {
        let (total_interest, principal) = self
            .total_interest
            .checked_add(interest)
            .zip(self.principal.checked_add(interest))
            .ok_or_else(|| {
                LoanScheduleError::ArithmeticOverflow(format!(
                    "adding interest {interest} to principal {}",
                    self.principal
                ))
            })?;
        self.total_interest = total_interest;
        self.principal = principal;
        Ok(interest)
    }

    /// Per-recipient totals as row cells, blank where nothing was paid.
    pub fn recipient_cells(&self) -> Vec<Option<Money>> {
        self.by_recipient
            .iter()
            .map(|t| if t.is_zero() { None } else { Some(*t) })
            .collect()
    }
}
