use serde_json::Value;
use std::io;

use super::ledger;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(ledger) = ledger(value) {
        for record in ledger_records(ledger) {
            let _ = wtr.write_record(&record);
        }
    } else {
        let fields = match value.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => value.as_object(),
        };
        match fields {
            Some(map) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
            None => {
                let _ = wtr.write_record([&format_csv_value(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

/// One record per ledger row with a column per recipient. Blank cells stay
/// empty; amounts keep full precision.
fn ledger_records(ledger: &serde_json::Map<String, Value>) -> Vec<Vec<String>> {
    let recipients = ledger
        .get("recipient_count")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;

    let mut header = vec!["kind".to_string(), "label".to_string()];
    header.extend((1..=recipients).map(|i| format!("payment_{i}")));
    header.extend(["interest", "balance", "projected"].map(String::from));

    let mut records = vec![header];
    if let Some(Value::Array(rows)) = ledger.get("rows") {
        for row in rows {
            let field = |key: &str| row.get(key).map(format_csv_value).unwrap_or_default();
            let mut record = vec![field("kind"), field("label")];
            for i in 0..recipients {
                record.push(
                    row.pointer(&format!("/payments/{i}"))
                        .map(format_csv_value)
                        .unwrap_or_default(),
                );
            }
            record.push(field("interest"));
            record.push(field("balance"));
            record.push(field("projected"));
            records.push(record);
        }
    }
    records
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
