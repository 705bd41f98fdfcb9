//! Write FIFO 8 (`0x47`): append a byte sequence to the FIFO identified by `id`.
//!
//! Request layout:
//!
//! ```text
//! +------+----+-------+-----------------+
//! | 0x47 | id | count | values          |
//! |  1   | 1  |   1   | count bytes     |
//! +------+----+-------+-----------------+
//! ```
//!
//! Response layout: `[0x47][quantity:1]`.

use crate::error::ProtocolError;
use crate::frame::{FrameReader, FrameWriter};
use crate::function::FunctionCode;
use crate::message::{Pdu, Request};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Function code byte + id byte + count byte.
const REQUEST_HEADER_SIZE: usize = 3;

/// Smallest well-formed request frame: header plus one value byte.
const MIN_REQUEST_SIZE: usize = REQUEST_HEADER_SIZE + 1;

/// Function code byte + quantity byte.
const RESPONSE_SIZE: usize = 2;

/// Configuration record accepted by [`WriteFifo8Request::from_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFifo8Options {
    /// FIFO identifier, 0..=255.
    pub id: i64,
    /// Bytes to write.
    pub values: Vec<u8>,
}

/// Request to write `values` into FIFO `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFifo8Request {
    id: u8,
    values: Bytes,
}

impl WriteFifo8Request {
    /// Minimum number of value bytes per request.
    pub const MIN_VALUES: usize = 1;

    /// Maximum number of value bytes per request; keeps the frame within a
    /// 253-byte PDU and the count within one byte.
    pub const MAX_VALUES: usize = 250;

    pub fn new(id: i64, values: impl Into<Bytes>) -> Result<Self, ProtocolError> {
        let id = u8::try_from(id).map_err(|_| ProtocolError::IdOutOfRange(id))?;
        let values = values.into();

        if !(Self::MIN_VALUES..=Self::MAX_VALUES).contains(&values.len()) {
            return Err(ProtocolError::ValuesLength {
                len: values.len(),
                min: Self::MIN_VALUES,
                max: Self::MAX_VALUES,
            });
        }

        Ok(Self { id, values })
    }

    pub fn from_options(options: WriteFifo8Options) -> Result<Self, ProtocolError> {
        Self::new(options.id, options.values)
    }

    /// Builds a request from a loosely typed record such as parsed JSON.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let options: WriteFifo8Options = serde_json::from_value(value)?;
        Self::from_options(options)
    }

    pub fn to_options(&self) -> WriteFifo8Options {
        WriteFifo8Options {
            id: i64::from(self.id),
            values: self.values.to_vec(),
        }
    }

    pub fn from_buffer(frame: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = FrameReader::new(frame);
        reader.ensure_len(MIN_REQUEST_SIZE)?;
        reader.expect_function_code(FunctionCode::WriteFifo8)?;

        let id = reader.read_u8()?;
        let count = reader.read_u8()? as usize;
        let values = reader.read_bytes(count)?;

        Self::new(i64::from(id), Bytes::copy_from_slice(values))
    }

    pub fn to_buffer(&self) -> Bytes {
        let mut writer = FrameWriter::with_capacity(REQUEST_HEADER_SIZE + self.values.len());
        writer
            .put_function_code(FunctionCode::WriteFifo8)
            .put_u8(self.id)
            .put_u8(self.values.len() as u8)
            .put_slice(&self.values);
        let frame = writer.finish();
        trace!(id = self.id, len = frame.len(), "encoded write fifo8 request");
        frame
    }

    pub fn code(&self) -> FunctionCode {
        FunctionCode::WriteFifo8
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

impl Pdu for WriteFifo8Request {
    const FUNCTION_CODE: FunctionCode = FunctionCode::WriteFifo8;

    fn encode(&self) -> Bytes {
        self.to_buffer()
    }

    fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        Self::from_buffer(frame)
    }
}

impl Request for WriteFifo8Request {
    type Response = WriteFifo8Response;
}

impl fmt::Display for WriteFifo8Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x47 (REQ) Write {} bytes to FIFO {:#04x}: {}",
            self.values.len(),
            self.id,
            hex::encode(&self.values)
        )
    }
}

/// Acknowledgment of a [`WriteFifo8Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteFifo8Response {
    quantity: u8,
}

impl WriteFifo8Response {
    pub fn new(quantity: u8) -> Self {
        Self { quantity }
    }

    pub fn from_buffer(frame: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = FrameReader::new(frame);
        reader.ensure_len(RESPONSE_SIZE)?;
        reader.expect_function_code(FunctionCode::WriteFifo8)?;

        Ok(Self {
            quantity: reader.read_u8()?,
        })
    }

    pub fn to_buffer(&self) -> Bytes {
        let mut writer = FrameWriter::with_capacity(RESPONSE_SIZE);
        writer
            .put_function_code(FunctionCode::WriteFifo8)
            .put_u8(self.quantity);
        writer.finish()
    }

    pub fn code(&self) -> FunctionCode {
        FunctionCode::WriteFifo8
    }

    /// Number of bytes the peer accepted into the FIFO.
    pub fn quantity(&self) -> u8 {
        self.quantity
    }
}

impl Pdu for WriteFifo8Response {
    const FUNCTION_CODE: FunctionCode = FunctionCode::WriteFifo8;

    fn encode(&self) -> Bytes {
        self.to_buffer()
    }

    fn decode(frame: &[u8]) -> Result<Self, ProtocolError> {
        Self::from_buffer(frame)
    }
}

impl fmt::Display for WriteFifo8Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x47 (RES) {} bytes written to FIFO", self.quantity)
    }
}
