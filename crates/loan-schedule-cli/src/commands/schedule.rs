use clap::Args;
use serde::Serialize;
use serde_json::Value;

use loan_schedule_core::codec::{self, EncodedSchedule};
use loan_schedule_core::{ComputationOutput, Schedule};

use crate::input::read_schedule;
use crate::input::fragment::{self, Link};

/// Arguments for encoding a schedule into a URL fragment
#[derive(Args)]
pub struct EncodeArgs {
    /// Path to JSON schedule file (reads piped stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Base URL of the viewer page; the fragment is appended after '#'
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Serialize)]
struct EncodeResult {
    fragment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    byte_length: usize,
    payment_count: usize,
    recipient_count: u8,
}

pub fn run_encode(args: EncodeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule: Schedule = read_schedule(args.input.as_deref())?
        .ok_or("--input <schedule.json> or stdin required for encode")?;

    let out = codec::encode_schedule(&schedule)?;
    let ComputationOutput {
        result:
            EncodedSchedule {
                bytes,
                byte_length,
                payment_count,
                recipient_count,
            },
        methodology,
        assumptions,
        warnings,
        metadata,
    } = out;

    let encoded = fragment::encode_fragment(&bytes);
    let result = EncodeResult {
        url: args.url.as_deref().map(|base| fragment::build_url(base, &encoded)),
        fragment: encoded,
        byte_length,
        payment_count,
        recipient_count,
    };

    Ok(serde_json::to_value(ComputationOutput {
        result,
        methodology,
        assumptions,
        warnings,
        metadata,
    })?)
}

/// Arguments for decoding a URL fragment
#[derive(Args)]
pub struct DecodeArgs {
    /// Encoded fragment, '#fragment', or full viewer URL
    pub link: String,
}

pub fn run_decode(args: DecodeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = link_bytes(&fragment::parse_link(&args.link))?;
    let out = codec::decode_schedule(&bytes)?;
    Ok(serde_json::to_value(out)?)
}

/// Arguments for summarising an encoded schedule
#[derive(Args)]
pub struct InspectArgs {
    /// Encoded fragment, '#fragment', or full viewer URL
    pub link: String,
}

pub fn run_inspect(args: InspectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = link_bytes(&fragment::parse_link(&args.link))?;
    let schedule = codec::decode(&bytes)?;

    Ok(serde_json::json!({
        "result": {
            "byte_length": bytes.len(),
            "expected_length": codec::encoded_len(schedule.recipient_count, schedule.payments.len()),
            "principal": schedule.principal_amount(),
            "annual_rate": schedule.annual_rate(),
            "interest_rate_bps": schedule.interest_rate_bps,
            "recipient_count": schedule.recipient_count,
            "payment_count": schedule.payments.len(),
            "first_payment": schedule.payments.first().map(|p| p.date),
            "last_payment": schedule.payments.last().map(|p| p.date),
        }
    }))
}

pub fn link_bytes(link: &Link) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if link.fragment.is_empty() {
        return Err("Link has no fragment to decode".into());
    }
    fragment::decode_fragment(&link.fragment)
}
