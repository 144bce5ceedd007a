use chrono::NaiveDate;
use napi::bindgen_prelude::Buffer;
use napi::Result as NapiResult;
use napi_derive::napi;

use loan_schedule_core::amortization::{self, AmortizationInput};
use loan_schedule_core::codec;
use loan_schedule_core::Schedule;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Raw schedule JSON -> encoded bytes. Transport encoding is left to the host.
#[napi]
pub fn encode_schedule(schedule_json: String) -> NapiResult<Buffer> {
    let schedule: Schedule = serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let bytes = codec::encode(&schedule).map_err(to_napi_error)?;
    Ok(bytes.into())
}

/// Encoded bytes -> schedule JSON wrapped with metadata and warnings.
#[napi]
pub fn decode_schedule(bytes: Buffer) -> NapiResult<String> {
    let output = codec::decode_schedule(&bytes).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Encoded bytes -> ledger JSON. `as_of` (YYYY-MM-DD) splits realized and
/// projected payments.
#[napi]
pub fn amortize_schedule(bytes: Buffer, as_of: Option<String>) -> NapiResult<String> {
    let schedule = codec::decode(&bytes).map_err(to_napi_error)?;
    let as_of = as_of
        .map(|s| s.parse::<NaiveDate>())
        .transpose()
        .map_err(to_napi_error)?;
    let output = amortization::amortize(&AmortizationInput { schedule, as_of })
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
