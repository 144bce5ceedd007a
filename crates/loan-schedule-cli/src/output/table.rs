use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_money, format_percent, ledger, rate_places};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value, currency: Option<&str>) {
    if let Some(ledger) = ledger(value) {
        print_ledger_table(ledger, currency);
        print_rates(value);
        print_envelope_notes(value);
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_flat_object(result);
                print_envelope_notes(value);
            } else {
                print_flat_object(map);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

/// Amortization table: date, one column per recipient, interest, principal.
fn print_ledger_table(ledger: &serde_json::Map<String, Value>, currency: Option<&str>) {
    let recipients = ledger
        .get("recipient_count")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;
    let split = ledger.get("as_of").is_some_and(|v| !v.is_null());

    let mut builder = Builder::default();
    let mut header = vec!["Date".to_string()];
    header.extend((1..=recipients).map(|i| format!("Payment {i}")));
    header.push("Interest".into());
    header.push("Principal".into());
    builder.push_record(header);

    let empty = Vec::new();
    for row in ledger
        .get("rows")
        .and_then(Value::as_array)
        .unwrap_or(&empty)
    {
        let kind = row.get("kind").and_then(Value::as_str).unwrap_or_default();
        let projected = row.get("projected").and_then(Value::as_bool).unwrap_or(false);
        let label = match (kind, split, projected) {
            ("start", _, _) => "Opening".to_string(),
            ("total", true, false) => "Total (realized)".to_string(),
            ("total", true, true) => "Total (projected)".to_string(),
            _ => row
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        let mut record = vec![label];
        let payments = row.get("payments").and_then(Value::as_array);
        for i in 0..recipients {
            let cell = payments.and_then(|p| p.get(i)).unwrap_or(&Value::Null);
            record.push(format_money(cell, currency));
        }
        record.push(format_money(row.get("interest").unwrap_or(&Value::Null), currency));
        record.push(format_money(row.get("balance").unwrap_or(&Value::Null), currency));
        builder.push_record(record);
    }

    println!("{}", Table::from(builder));
}

/// Annual and daily rate beneath the ledger, from the run's assumptions.
fn print_rates(value: &Value) {
    let annual = value.pointer("/assumptions/annual_rate").unwrap_or(&Value::Null);
    let daily = value.pointer("/result/daily_rate").unwrap_or(&Value::Null);
    if annual.is_null() && daily.is_null() {
        return;
    }
    println!(
        "\nRate: {} per year ({} per day, 365-day year)",
        format_percent(annual, 2),
        format_percent(daily, 4)
    );
}

fn print_envelope_notes(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let shown = match rate_places(key) {
            Some(dp) => format_percent(val, dp),
            None => format_value(val),
        };
        builder.push_record([key.as_str(), &shown]);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
