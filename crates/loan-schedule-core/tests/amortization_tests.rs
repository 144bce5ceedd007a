use chrono::NaiveDate;
use loan_schedule_core::amortization::{self, AmortizationInput, RowKind};
use loan_schedule_core::codec::{self, from_epoch_day};
use loan_schedule_core::{cents_to_money, Cents, LoanScheduleError, PaymentEvent, Schedule};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

const TOLERANCE: Decimal = dec!(0.000001);

fn event(day: u16, amounts: Vec<Cents>) -> PaymentEvent {
    PaymentEvent {
        date: from_epoch_day(day),
        amounts,
    }
}

fn daily_rate(bps: u16) -> Decimal {
    Decimal::from(bps) / dec!(10000) / dec!(365)
}

// ===========================================================================
// End-to-end: 1000.00 at 5%, payments on day 0 and day 31
// ===========================================================================

fn worked_example() -> Schedule {
    Schedule {
        principal: 100_000,
        interest_rate_bps: 500,
        recipient_count: 1,
        payments: vec![event(0, vec![50_000]), event(31, vec![0])],
    }
}

#[test]
fn test_worked_example_through_codec() {
    let bytes = codec::encode(&worked_example()).unwrap();
    let schedule = codec::decode(&bytes).unwrap();
    let ledger = amortization::generate(&schedule, None).unwrap();
    let r = daily_rate(500);

    assert_eq!(ledger.rows.len(), 5);

    // Opening principal
    let start = &ledger.rows[0];
    assert_eq!(start.kind, RowKind::Start);
    assert_eq!(start.balance, dec!(1000));
    assert_eq!(start.interest, None);
    assert_eq!(start.label, "");

    // Day 0: pay 500, then one day of simple interest on 500
    let first = &ledger.rows[1];
    assert_eq!(first.kind, RowKind::Payment);
    assert_eq!(first.label, "1970-01-01");
    assert_eq!(first.payments, vec![Some(dec!(500))]);
    let first_interest = dec!(500) * r;
    assert_eq!(first.interest, Some(first_interest));
    assert_eq!(first.balance, dec!(500) + first_interest);

    // Days 1..=30 compound
    let gap = &ledger.rows[2];
    assert_eq!(gap.kind, RowKind::Gap);
    assert_eq!(gap.label, "1970-01-02 - 1970-01-31");
    assert_eq!(gap.payments, vec![None]);
    let gap_interest = first.balance * ((Decimal::ONE + r).powu(30) - Decimal::ONE);
    assert!((gap.interest.unwrap() - gap_interest).abs() < TOLERANCE);

    // Day 31: zero payment renders blank, one more day of simple interest
    let last = &ledger.rows[3];
    assert_eq!(last.kind, RowKind::Payment);
    assert_eq!(last.label, "1970-02-01");
    assert_eq!(last.payments, vec![None]);
    assert_eq!(last.interest, Some(gap.balance * r));

    // Totals
    let total = &ledger.rows[4];
    assert_eq!(total.kind, RowKind::Total);
    assert_eq!(total.payments, vec![Some(dec!(500))]);
    let interest_sum: Decimal = ledger.rows[1..4].iter().filter_map(|row| row.interest).sum();
    assert_eq!(total.interest, Some(interest_sum));
    assert_eq!(total.interest, Some(ledger.total_interest));
    assert_eq!(total.balance, ledger.final_principal);
    assert_eq!(ledger.total_paid, dec!(500));
}

// ===========================================================================
// Gap behaviour
// ===========================================================================

#[test]
fn test_consecutive_days_have_no_gap() {
    let s = Schedule {
        principal: 1_000_000,
        interest_rate_bps: 1200,
        recipient_count: 1,
        payments: (100..110).map(|d| event(d, vec![1_000])).collect(),
    };
    let ledger = amortization::generate(&s, None).unwrap();
    assert_eq!(ledger.rows_of(RowKind::Gap).count(), 0);
    assert_eq!(ledger.rows_of(RowKind::Payment).count(), 10);
}

#[test]
fn test_first_payment_far_from_epoch_has_no_gap() {
    let s = Schedule {
        principal: 1_000_000,
        interest_rate_bps: 1200,
        recipient_count: 1,
        payments: vec![event(20_000, vec![1_000])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    let kinds: Vec<RowKind> = ledger.rows.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![RowKind::Start, RowKind::Payment, RowKind::Total]);
}

#[test]
fn test_gap_compounds_rather_than_simple() {
    let s = Schedule {
        principal: 1_000_000,
        interest_rate_bps: 2000,
        recipient_count: 1,
        payments: vec![event(0, vec![0]), event(91, vec![0])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    let r = daily_rate(2000);
    let p = ledger.rows[1].balance;

    let gap = ledger.rows_of(RowKind::Gap).next().unwrap();
    assert_eq!(gap.start_date, Some(from_epoch_day(1)));
    assert_eq!(gap.end_date, Some(from_epoch_day(90)));

    let compound = p * ((Decimal::ONE + r).powu(90) - Decimal::ONE);
    let simple = p * r * dec!(90);
    let interest = gap.interest.unwrap();
    assert!((interest - compound).abs() < TOLERANCE);
    assert!(interest - simple > dec!(1));
}

#[test]
fn test_one_day_gap_uses_single_date_label() {
    let s = Schedule {
        principal: 100_000,
        interest_rate_bps: 500,
        recipient_count: 1,
        payments: vec![event(0, vec![0]), event(2, vec![0])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    let gap = ledger.rows_of(RowKind::Gap).next().unwrap();
    assert_eq!(gap.label, "1970-01-02");
    let r = daily_rate(500);
    let expected = ledger.rows[1].balance * r;
    assert!((gap.interest.unwrap() - expected).abs() < TOLERANCE);
}

// ===========================================================================
// Payment rows
// ===========================================================================

#[test]
fn test_simple_interest_on_reduced_principal() {
    let s = Schedule {
        principal: 500_000,
        interest_rate_bps: 730,
        recipient_count: 2,
        payments: vec![event(0, vec![100_000, 50_000])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    let row = &ledger.rows[1];
    // 5000 - 1000 - 500 = 3500; 7.3% / 365 = 0.0002 per day
    assert_eq!(row.interest, Some(dec!(0.7)));
    assert_eq!(row.balance, dec!(3500.7));
}

#[test]
fn test_zero_amounts_render_blank() {
    let s = Schedule {
        principal: 500_000,
        interest_rate_bps: 0,
        recipient_count: 3,
        payments: vec![event(0, vec![0, 100, 0]), event(1, vec![0, 0, 0])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    assert_eq!(ledger.rows[1].payments, vec![None, Some(dec!(1)), None]);
    assert_eq!(ledger.rows[2].payments, vec![None, None, None]);
    let total = ledger.rows.last().unwrap();
    assert_eq!(total.payments, vec![None, Some(dec!(1)), None]);
    assert_eq!(ledger.totals_by_recipient, vec![dec!(0), dec!(1), dec!(0)]);
}

#[test]
fn test_zero_rate_accrues_nothing() {
    let s = Schedule {
        principal: 100_000,
        interest_rate_bps: 0,
        recipient_count: 1,
        payments: vec![event(0, vec![10_000]), event(400, vec![10_000])],
    };
    let ledger = amortization::generate(&s, None).unwrap();
    assert_eq!(ledger.total_interest, Decimal::ZERO);
    assert_eq!(ledger.final_principal, dec!(800));
}

// ===========================================================================
// Conservation
// ===========================================================================

#[test]
fn test_totals_conservation() {
    let payments = vec![
        event(19_000, vec![120_000, 0]),
        event(19_031, vec![120_000, 5_000]),
        event(19_032, vec![0, 5_000]),
        event(19_090, vec![120_000, 0]),
        event(19_365, vec![2_000_000, 250_000]),
    ];
    let paid: Cents = payments.iter().flat_map(|p| p.amounts.iter()).sum();
    let s = Schedule {
        principal: 5_000_000,
        interest_rate_bps: 899,
        recipient_count: 2,
        payments,
    };
    let ledger = amortization::generate(&s, None).unwrap();

    let expected = cents_to_money(s.principal) - cents_to_money(paid) + ledger.total_interest;
    assert!((ledger.final_principal - expected).abs() < TOLERANCE);
    assert_eq!(ledger.total_paid, cents_to_money(paid));
}

// ===========================================================================
// Realized vs projected
// ===========================================================================

#[test]
fn test_realized_and_projected_totals() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let s = Schedule {
        principal: 1_000_000,
        interest_rate_bps: 600,
        recipient_count: 1,
        payments: vec![
            PaymentEvent {
                date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
                amounts: vec![100_000],
            },
            PaymentEvent {
                date: today,
                amounts: vec![100_000],
            },
            PaymentEvent {
                date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                amounts: vec![100_000],
            },
        ],
    };
    let out = amortization::amortize(&AmortizationInput {
        schedule: s,
        as_of: Some(today),
    })
    .unwrap();
    let ledger = out.result;

    let totals: Vec<_> = ledger.rows_of(RowKind::Total).collect();
    assert_eq!(totals.len(), 2);
    assert!(!totals[0].projected);
    assert!(totals[1].projected);
    assert_eq!(totals[0].payments, vec![Some(dec!(2000))]);
    assert_eq!(totals[1].payments, vec![Some(dec!(3000))]);
    assert!(totals[1].interest.unwrap() > totals[0].interest.unwrap());

    // the payment on the cut-off day itself is realized
    let on_cutoff = ledger
        .rows
        .iter()
        .find(|r| r.kind == RowKind::Payment && r.start_date == Some(today))
        .unwrap();
    assert!(!on_cutoff.projected);
}

#[test]
fn test_row_kind_tags_serialize_lowercase() {
    let ledger = amortization::generate(&worked_example(), None).unwrap();
    let json = serde_json::to_value(&ledger).unwrap();
    let tags: Vec<&str> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["start", "payment", "gap", "payment", "total"]);
}

// ===========================================================================
// Overflow
// ===========================================================================

#[test]
fn test_daily_accrual_overflow_is_an_error() {
    // The gap compounds to just under Decimal::MAX; the daily payment rows
    // that follow push the balance past it.
    let mut payments = vec![event(0, vec![0])];
    payments.extend((2600..2850).map(|d| event(d, vec![0])));
    let s = Schedule {
        principal: u32::MAX,
        interest_rate_bps: u16::MAX,
        recipient_count: 1,
        payments,
    };
    let result = amortization::generate(&s, None);
    assert!(
        matches!(result, Err(LoanScheduleError::ArithmeticOverflow(_))),
        "expected ArithmeticOverflow, got {result:?}"
    );
}
