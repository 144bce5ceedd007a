use serde::Serialize;
use std::time::Instant;

use super::cursor::{ByteReader, ByteWriter};
use super::epoch::{from_epoch_day, to_epoch_day};
use crate::error::LoanScheduleError;
use crate::types::*;
use crate::LoanScheduleResult;

/// principal (4) + rate (2) + recipient count (1) + payment count (1)
pub const HEADER_LEN: usize = 4 + 2 + 1 + 1;

const DATE_LEN: usize = 2;
const AMOUNT_LEN: usize = 4;

/// Exact byte length of an encoded schedule with the given counts.
pub fn encoded_len(recipient_count: u8, payment_count: usize) -> usize {
    HEADER_LEN + payment_count * (DATE_LEN + AMOUNT_LEN * recipient_count as usize)
}

/// Encode a schedule into its fixed-layout binary form.
///
/// Amounts missing from an event are written as 0 and amounts beyond
/// `recipient_count` are dropped. Dates outside epoch days `0..=65535` and
/// more than 255 payments cannot be represented and are rejected.
pub fn encode(schedule: &Schedule) -> LoanScheduleResult<Vec<u8>> {
    let payment_count = u8::try_from(schedule.payments.len()).map_err(|_| {
        LoanScheduleError::InvalidInput {
            field: "payments".into(),
            reason: format!(
                "At most {} payments fit the format, got {}",
                u8::MAX,
                schedule.payments.len()
            ),
        }
    })?;

    let recipients = schedule.recipient_count as usize;
    let mut writer = ByteWriter::with_capacity(encoded_len(
        schedule.recipient_count,
        schedule.payments.len(),
    ));

    writer.u32(schedule.principal);
    writer.u16(schedule.interest_rate_bps);
    writer.u8(schedule.recipient_count);
    writer.u8(payment_count);

    for (i, event) in schedule.payments.iter().enumerate() {
        writer.u16(wire_date(event, i)?);
        for r in 0..recipients {
            writer.u32(event.amounts.get(r).copied().unwrap_or(0));
        }
    }

    Ok(writer.finish())
}

fn wire_date(event: &PaymentEvent, index: usize) -> LoanScheduleResult<u16> {
    let day = to_epoch_day(event.date);
    u16::try_from(day).map_err(|_| LoanScheduleError::InvalidInput {
        field: format!("payments[{index}].date"),
        reason: format!(
            "{} is epoch day {day}; only days 0 to {} are representable",
            event.date,
            u16::MAX
        ),
    })
}

/// Decode a schedule from its binary form.
///
/// Reads the header, then exactly `payment count` records of one date and
/// `recipient count` amounts each. A buffer shorter than the header declares
/// fails with [`LoanScheduleError::MalformedInput`]; bytes after the last
/// record are ignored.
pub fn decode(bytes: &[u8]) -> LoanScheduleResult<Schedule> {
    let mut reader = ByteReader::new(bytes);

    let principal = reader.u32()?;
    let interest_rate_bps = reader.u16()?;
    let recipient_count = reader.u8()?;
    let payment_count = reader.u8()?;

    let mut payments = Vec::with_capacity(payment_count as usize);
    for _ in 0..payment_count {
        let date = from_epoch_day(reader.u16()?);
        let amounts = (0..recipient_count)
            .map(|_| reader.u32())
            .collect::<LoanScheduleResult<Vec<_>>>()?;
        payments.push(PaymentEvent { date, amounts });
    }

    Ok(Schedule {
        principal,
        interest_rate_bps,
        recipient_count,
        payments,
    })
}

/// Summary of an encoding pass.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedSchedule {
    pub bytes: Vec<u8>,
    pub byte_length: usize,
    pub payment_count: usize,
    pub recipient_count: u8,
}

/// Encode a schedule and wrap the bytes with metadata and producer warnings.
pub fn encode_schedule(schedule: &Schedule) -> LoanScheduleResult<ComputationOutput<EncodedSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (i, event) in schedule.payments.iter().enumerate() {
        let n = event.amounts.len();
        let expected = schedule.recipient_count as usize;
        if n < expected {
            warnings.push(format!(
                "Payment {i} ({}) has {n} amount(s) for {expected} recipient(s); missing amounts encoded as 0",
                event.date
            ));
        } else if n > expected {
            warnings.push(format!(
                "Payment {i} ({}) has {n} amount(s) for {expected} recipient(s); extra amounts dropped",
                event.date
            ));
        }
    }

    if schedule
        .payments
        .windows(2)
        .any(|w| w[1].date <= w[0].date)
    {
        warnings.push("Payments are not in strictly ascending date order".into());
    }

    let bytes = encode(schedule)?;
    let output = EncodedSchedule {
        byte_length: bytes.len(),
        bytes,
        payment_count: schedule.payments.len(),
        recipient_count: schedule.recipient_count,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-layout big-endian schedule encoding",
        &serde_json::json!({
            "principal_cents": schedule.principal,
            "interest_rate_bps": schedule.interest_rate_bps,
            "recipients": schedule.recipient_count,
            "payments": schedule.payments.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Decode a schedule and wrap it with metadata, warning on trailing bytes.
pub fn decode_schedule(bytes: &[u8]) -> LoanScheduleResult<ComputationOutput<Schedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = decode(bytes)?;
    let expected = encoded_len(schedule.recipient_count, schedule.payments.len());
    if bytes.len() > expected {
        warnings.push(format!(
            "{} trailing byte(s) after the last payment record were ignored",
            bytes.len() - expected
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-layout big-endian schedule decoding",
        &serde_json::json!({
            "byte_length": bytes.len(),
            "expected_length": expected,
        }),
        warnings,
        elapsed,
        schedule,
    ))
}
