//! Function code registry.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// High bit OR'd onto a function code to mark an exception reply.
pub const EXCEPTION_FLAG: u8 = 0x80;

/// Mask that strips [`EXCEPTION_FLAG`] from a reply's function code.
pub const FUNCTION_CODE_MASK: u8 = 0x7F;

/// Operation identifiers carried in byte 0 of every PDU.
///
/// Values never use the exception flag; a reply carrying
/// `code | EXCEPTION_FLAG` is an [`ExceptionResponse`](crate::ExceptionResponse)
/// for `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FunctionCode {
    ReadCoils = 0x01,
    ReadDiscreteInputs = 0x02,
    ReadHoldingRegisters = 0x03,
    ReadInputRegisters = 0x04,
    WriteSingleCoil = 0x05,
    WriteSingleRegister = 0x06,
    ReadExceptionStatus = 0x07,
    Diagnostics = 0x08,
    GetCommEventCounter = 0x0B,
    GetCommEventLog = 0x0C,
    WriteMultipleCoils = 0x0F,
    WriteMultipleRegisters = 0x10,
    ReportServerId = 0x11,
    ReadFileRecord = 0x14,
    WriteFileRecord = 0x15,
    MaskWriteRegister = 0x16,
    ReadWriteMultipleRegisters = 0x17,
    ReadFifoQueue = 0x18,
    EncapsulatedInterfaceTransport = 0x2B,
    /// Vendor extension: write a byte sequence into a FIFO.
    WriteFifo8 = 0x47,
}

impl FunctionCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the byte a peer sends back when this operation fails.
    pub fn exception_code(self) -> u8 {
        self.as_u8() | EXCEPTION_FLAG
    }

    /// Returns whether `byte` is the exception-flagged form of this code.
    pub fn is_exception_of(self, byte: u8) -> bool {
        is_exception(byte) && byte & FUNCTION_CODE_MASK == self.as_u8()
    }
}

/// Returns whether a reply's function code byte carries the exception flag.
pub fn is_exception(byte: u8) -> bool {
    byte & EXCEPTION_FLAG != 0
}

impl TryFrom<u8> for FunctionCode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(FunctionCode::ReadCoils),
            0x02 => Ok(FunctionCode::ReadDiscreteInputs),
            0x03 => Ok(FunctionCode::ReadHoldingRegisters),
            0x04 => Ok(FunctionCode::ReadInputRegisters),
            0x05 => Ok(FunctionCode::WriteSingleCoil),
            0x06 => Ok(FunctionCode::WriteSingleRegister),
            0x07 => Ok(FunctionCode::ReadExceptionStatus),
            0x08 => Ok(FunctionCode::Diagnostics),
            0x0B => Ok(FunctionCode::GetCommEventCounter),
            0x0C => Ok(FunctionCode::GetCommEventLog),
            0x0F => Ok(FunctionCode::WriteMultipleCoils),
            0x10 => Ok(FunctionCode::WriteMultipleRegisters),
            0x11 => Ok(FunctionCode::ReportServerId),
            0x14 => Ok(FunctionCode::ReadFileRecord),
            0x15 => Ok(FunctionCode::WriteFileRecord),
            0x16 => Ok(FunctionCode::MaskWriteRegister),
            0x17 => Ok(FunctionCode::ReadWriteMultipleRegisters),
            0x18 => Ok(FunctionCode::ReadFifoQueue),
            0x2B => Ok(FunctionCode::EncapsulatedInterfaceTransport),
            0x47 => Ok(FunctionCode::WriteFifo8),
            _ => Err(ProtocolError::UnknownFunctionCode(value)),
        }
    }
}

impl From<FunctionCode> for u8 {
    fn from(code: FunctionCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#04x})", self, self.as_u8())
    }
}
