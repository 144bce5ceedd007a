use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use loan_schedule_core::amortization::{self, AmortizationInput};
use loan_schedule_core::codec;

use super::schedule::link_bytes;
use crate::input::{fragment, read_schedule};

/// Arguments for rendering an amortization ledger
#[derive(Args)]
pub struct AmortizeArgs {
    /// Encoded fragment, '#fragment', or full viewer URL
    pub link: Option<String>,

    /// Path to JSON schedule file (instead of an encoded link)
    #[arg(long, conflicts_with = "link")]
    pub input: Option<String>,

    /// Split realized and projected payments at this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "today")]
    pub as_of: Option<NaiveDate>,

    /// Split realized and projected payments at the local date
    #[arg(long)]
    pub today: bool,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut currency = None;
    let schedule = match args.link {
        Some(ref raw) => {
            let link = fragment::parse_link(raw);
            currency = link.currency.clone();
            codec::decode(&link_bytes(&link)?)?
        }
        None => read_schedule(args.input.as_deref())?
            .ok_or("an encoded link, --input <schedule.json> or stdin is required")?,
    };

    let as_of = if args.today {
        Some(chrono::Local::now().date_naive())
    } else {
        args.as_of
    };

    let input = AmortizationInput { schedule, as_of };
    let result = amortization::amortize(&input)?;

    let mut value = serde_json::to_value(result)?;
    if let Some(code) = currency {
        if let Some(assumptions) = value.get_mut("assumptions").and_then(Value::as_object_mut) {
            assumptions.insert("currency".into(), Value::String(code));
        }
    }
    Ok(value)
}
