//! Big-endian byte frame reader and writer.
//!
//! Every PDU starts with a one-byte function code followed by
//! operation-specific fields:
//!
//! ```text
//! +---------------+------------------------------------------+
//! | function code | fields (u8 / big-endian u16 / raw bytes) |
//! |    1 byte     |            operation defined             |
//! +---------------+------------------------------------------+
//! ```
//!
//! Reads are bounds-checked and fail with
//! [`ProtocolError::TruncatedFrame`] instead of padding missing bytes.

use crate::error::ProtocolError;
use crate::function::FunctionCode;
use bytes::{BufMut, Bytes, BytesMut};

/// Cursor over a received frame.
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Fails unless the whole frame is at least `min` bytes long.
    pub fn ensure_len(&self, min: usize) -> Result<(), ProtocolError> {
        if self.buf.len() < min {
            return Err(ProtocolError::TruncatedFrame {
                needed: min,
                actual: self.buf.len(),
            });
        }
        Ok(())
    }

    fn ensure_remaining(&self, n: usize) -> Result<(), ProtocolError> {
        self.ensure_len(self.pos + n)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        self.ensure_remaining(1)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, ProtocolError> {
        self.ensure_remaining(2)?;
        let value = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ProtocolError> {
        self.ensure_remaining(n)?;
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consumes the function code byte and checks it against `expected`.
    pub fn expect_function_code(&mut self, expected: FunctionCode) -> Result<(), ProtocolError> {
        let actual = self.read_u8()?;
        if actual != expected.as_u8() {
            return Err(ProtocolError::FunctionCodeMismatch {
                expected: expected.as_u8(),
                actual,
            });
        }
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

/// Builder for an outgoing frame of known size.
#[derive(Debug)]
pub struct FrameWriter {
    buf: BytesMut,
}

impl FrameWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn put_function_code(&mut self, code: FunctionCode) -> &mut Self {
        self.put_u8(code.as_u8())
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16(value);
        self
    }

    pub fn put_slice(&mut self, src: &[u8]) -> &mut Self {
        self.buf.put_slice(src);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freezes the written bytes into an immutable frame.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}
