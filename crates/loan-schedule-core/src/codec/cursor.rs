//! Single-cursor big-endian readers and writers over byte buffers.

use crate::error::LoanScheduleError;
use crate::LoanScheduleResult;

/// Reads big-endian unsigned integers from a byte slice, advancing one cursor.
///
/// Every read is bounds-checked: running off the end of the slice yields
/// [`LoanScheduleError::MalformedInput`] and leaves the cursor untouched.
pub struct ByteReader<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    fn take<const N: usize>(&mut self) -> LoanScheduleResult<[u8; N]> {
        let end = self.x + N;
        let bytes: [u8; N] = self
            .data
            .get(self.x..end)
            .and_then(|s| s.try_into().ok())
            .ok_or(LoanScheduleError::MalformedInput {
                offset: self.x,
                needed: N,
                available: self.remaining(),
            })?;
        self.x = end;
        Ok(bytes)
    }

    #[inline]
    pub fn u8(&mut self) -> LoanScheduleResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    #[inline]
    pub fn u16(&mut self) -> LoanScheduleResult<u16> {
        Ok(u16::from_be_bytes(self.take::<2>()?))
    }

    #[inline]
    pub fn u32(&mut self) -> LoanScheduleResult<u32> {
        Ok(u32::from_be_bytes(self.take::<4>()?))
    }
}

/// Writes big-endian unsigned integers into a buffer allocated up front.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a writer whose buffer holds exactly `len` bytes without growing.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
        }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Consumes the writer and returns the written bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
