pub mod csv_out;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, currency: Option<&str>) {
    let currency = currency.map(str::to_string).or_else(|| {
        value
            .pointer("/assumptions/currency")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value, currency.as_deref()),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Print the one value a script most likely wants: the link for `encode`,
/// the closing principal for `amortize`, the principal for `decode`/`inspect`.
fn print_minimal(value: &Value) {
    let result = value.get("result").unwrap_or(value);
    let answer = ["url", "fragment", "final_principal", "principal"]
        .iter()
        .find_map(|key| result.get(*key).filter(|v| !v.is_null()));

    match answer.unwrap_or(result) {
        Value::String(s) => println!("{}", s),
        other => println!("{}", other),
    }
}

/// The ledger object inside a result envelope, if this output carries one.
pub(crate) fn ledger(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    let result = value.get("result")?.as_object()?;
    let rows = result.get("rows")?.as_array()?;
    if rows.iter().all(|r| r.get("kind").is_some()) {
        Some(result)
    } else {
        None
    }
}

/// Render a decimal money value to cents, prefixed with the currency code.
/// Null renders blank.
pub(crate) fn format_money(value: &Value, currency: Option<&str>) -> String {
    let amount = match value {
        Value::String(s) => s.parse::<Decimal>().ok(),
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        _ => None,
    };
    match (amount, currency) {
        (Some(a), Some(code)) => format!("{code} {:.2}", a.round_dp(2)),
        (Some(a), None) => format!("{:.2}", a.round_dp(2)),
        (None, _) => String::new(),
    }
}

/// Render a decimal rate (0.05) as a percentage (`5.00%`) with `dp` places.
pub(crate) fn format_percent(value: &Value, dp: u32) -> String {
    let rate = match value {
        Value::String(s) => s.parse::<Decimal>().ok(),
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        _ => None,
    };
    match rate {
        Some(r) => format!("{:.*}%", dp as usize, (r * Decimal::ONE_HUNDRED).round_dp(dp)),
        None => String::new(),
    }
}

/// Decimal places for a rate field in table output; `None` when the field
/// is not a rate.
pub(crate) fn rate_places(key: &str) -> Option<u32> {
    match key {
        "annual_rate" => Some(2),
        "daily_rate" => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(&json!("500.0684931506"), None), "500.07");
        assert_eq!(format_money(&json!("12"), Some("EUR")), "EUR 12.00");
        assert_eq!(format_money(&Value::Null, Some("EUR")), "");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(&json!("0.05"), 2), "5.00%");
        assert_eq!(format_percent(&json!("0.0725"), 2), "7.25%");
        assert_eq!(format_percent(&json!("0.000136986301369863"), 4), "0.0137%");
        assert_eq!(format_percent(&Value::Null, 2), "");
    }

    #[test]
    fn test_rate_places() {
        assert_eq!(rate_places("annual_rate"), Some(2));
        assert_eq!(rate_places("daily_rate"), Some(4));
        assert_eq!(rate_places("interest_rate_bps"), None);
    }

    #[test]
    fn test_ledger_detection() {
        let v = json!({ "result": { "rows": [{ "kind": "start" }] } });
        assert!(ledger(&v).is_some());
        let v = json!({ "result": { "fragment": "abc" } });
        assert!(ledger(&v).is_none());
    }
}
