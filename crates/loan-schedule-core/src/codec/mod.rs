//! Fixed-layout binary codec for [`Schedule`](crate::types::Schedule).
//!
//! ```text
//! u32 principal (cents) | u16 rate (bps) | u8 recipients N | u8 payments M
//! M × ( u16 epoch day | N × u32 amount (cents) )
//! ```
//!
//! Every multi-byte field is big-endian. There is no padding, no delimiter
//! and no per-record length tag: the header counts alone size the body.

pub mod cursor;
pub mod epoch;
pub mod schedule;

pub use cursor::{ByteReader, ByteWriter};
pub use epoch::{from_epoch_day, to_epoch_day, EPOCH};
pub use schedule::{
    decode, decode_schedule, encode, encode_schedule, encoded_len, EncodedSchedule, HEADER_LEN,
};
