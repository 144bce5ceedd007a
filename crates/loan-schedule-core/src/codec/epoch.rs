//! Calendar dates as whole-day offsets from 1970-01-01.

use chrono::{Days, NaiveDate};

/// 1970-01-01, day zero of the wire date representation.
pub const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(d) => d,
    None => panic!("invalid epoch"),
};

/// Whole days from the epoch to `date` (negative before 1970).
pub fn to_epoch_day(date: NaiveDate) -> i64 {
    (date - EPOCH).num_days()
}

/// The date `day` days after the epoch. Every `u16` offset lands in 2149 or
/// earlier, well inside chrono's range.
pub fn from_epoch_day(day: u16) -> NaiveDate {
    EPOCH + Days::new(u64::from(day))
}
