//! Exception replies.
//!
//! Any operation can fail on the peer side with the same two-byte layout:
//!
//! ```text
//! +--------------------+----------------+
//! | function code|0x80 | exception code |
//! |       1 byte       |     1 byte     |
//! +--------------------+----------------+
//! ```

use crate::error::ProtocolError;
use crate::frame::{FrameReader, FrameWriter};
use crate::function::{is_exception, FunctionCode, EXCEPTION_FLAG, FUNCTION_CODE_MASK};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of an exception reply in bytes.
pub const EXCEPTION_RESPONSE_SIZE: usize = 2;

/// Named view of the exception byte.
///
/// The raw byte stays authoritative: unrecognized values are carried as
/// [`ExceptionCode::Other`] and convert back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionCode {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    ServerDeviceFailure,
    Acknowledge,
    ServerDeviceBusy,
    MemoryParityError,
    GatewayPathUnavailable,
    GatewayTargetFailedToRespond,
    Other(u8),
}

impl ExceptionCode {
    /// Returns whether the peer may succeed if the request is sent again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExceptionCode::Acknowledge
                | ExceptionCode::ServerDeviceBusy
                | ExceptionCode::GatewayTargetFailedToRespond
        )
    }
}

impl From<u8> for ExceptionCode {
    fn from(value: u8) -> Self {
        match value {
            0x01 => ExceptionCode::IllegalFunction,
            0x02 => ExceptionCode::IllegalDataAddress,
            0x03 => ExceptionCode::IllegalDataValue,
            0x04 => ExceptionCode::ServerDeviceFailure,
            0x05 => ExceptionCode::Acknowledge,
            0x06 => ExceptionCode::ServerDeviceBusy,
            0x08 => ExceptionCode::MemoryParityError,
            0x0A => ExceptionCode::GatewayPathUnavailable,
            0x0B => ExceptionCode::GatewayTargetFailedToRespond,
            other => ExceptionCode::Other(other),
        }
    }
}

impl From<ExceptionCode> for u8 {
    fn from(code: ExceptionCode) -> Self {
        match code {
            ExceptionCode::IllegalFunction => 0x01,
            ExceptionCode::IllegalDataAddress => 0x02,
            ExceptionCode::IllegalDataValue => 0x03,
            ExceptionCode::ServerDeviceFailure => 0x04,
            ExceptionCode::Acknowledge => 0x05,
            ExceptionCode::ServerDeviceBusy => 0x06,
            ExceptionCode::MemoryParityError => 0x08,
            ExceptionCode::GatewayPathUnavailable => 0x0A,
            ExceptionCode::GatewayTargetFailedToRespond => 0x0B,
            ExceptionCode::Other(other) => other,
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExceptionCode::IllegalFunction => write!(f, "ILLEGAL_FUNCTION"),
            ExceptionCode::IllegalDataAddress => write!(f, "ILLEGAL_DATA_ADDRESS"),
            ExceptionCode::IllegalDataValue => write!(f, "ILLEGAL_DATA_VALUE"),
            ExceptionCode::ServerDeviceFailure => write!(f, "SERVER_DEVICE_FAILURE"),
            ExceptionCode::Acknowledge => write!(f, "ACKNOWLEDGE"),
            ExceptionCode::ServerDeviceBusy => write!(f, "SERVER_DEVICE_BUSY"),
            ExceptionCode::MemoryParityError => write!(f, "MEMORY_PARITY_ERROR"),
            ExceptionCode::GatewayPathUnavailable => write!(f, "GATEWAY_PATH_UNAVAILABLE"),
            ExceptionCode::GatewayTargetFailedToRespond => {
                write!(f, "GATEWAY_TARGET_FAILED_TO_RESPOND")
            }
            ExceptionCode::Other(code) => write!(f, "EXCEPTION_{:#04x}", code),
        }
    }
}

/// Peer-reported failure of a request.
///
/// Decoding one is a successful outcome: the frame was well formed and
/// answers the request, it just carries a fault instead of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExceptionResponse {
    /// Function code of the failed request, exception flag cleared.
    code: u8,
    exception_code: u8,
}

impl ExceptionResponse {
    pub fn new(code: FunctionCode, exception_code: impl Into<u8>) -> Self {
        Self {
            code: code.as_u8(),
            exception_code: exception_code.into(),
        }
    }

    /// Decodes an exception reply. The function code byte must carry the
    /// exception flag.
    pub fn from_buffer(frame: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = FrameReader::new(frame);
        reader.ensure_len(EXCEPTION_RESPONSE_SIZE)?;

        let flagged = reader.read_u8()?;
        if !is_exception(flagged) {
            return Err(ProtocolError::NotAnException(flagged));
        }
        let exception_code = reader.read_u8()?;

        Ok(Self {
            code: flagged & FUNCTION_CODE_MASK,
            exception_code,
        })
    }

    pub fn to_buffer(&self) -> Bytes {
        let mut writer = FrameWriter::with_capacity(EXCEPTION_RESPONSE_SIZE);
        writer
            .put_u8(self.code | EXCEPTION_FLAG)
            .put_u8(self.exception_code);
        writer.finish()
    }

    /// Function code of the failed request with the exception flag cleared.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Resolves [`code`](Self::code) in the function code registry.
    pub fn function_code(&self) -> Result<FunctionCode, ProtocolError> {
        FunctionCode::try_from(self.code)
    }

    pub fn exception_code(&self) -> u8 {
        self.exception_code
    }

    pub fn kind(&self) -> ExceptionCode {
        ExceptionCode::from(self.exception_code)
    }
}

impl fmt::Display for ExceptionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExceptionResponse(code={:#04x}, exception={})",
            self.code,
            self.kind()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_buffer() {
        let res = ExceptionResponse::from_buffer(&[0xC7, 0x02]).unwrap();
        assert_eq!(res.code(), 0x47);
        assert_eq!(res.function_code().unwrap(), FunctionCode::WriteFifo8);
        assert_eq!(res.exception_code(), 2);
        assert_eq!(res.kind(), ExceptionCode::IllegalDataAddress);
    }

    #[test]
    fn test_from_buffer_truncated() {
        assert!(matches!(
            ExceptionResponse::from_buffer(&[]),
            Err(ProtocolError::TruncatedFrame {
                needed: 2,
                actual: 0
            })
        ));
        assert!(matches!(
            ExceptionResponse::from_buffer(&[0xC7]),
            Err(ProtocolError::TruncatedFrame {
                needed: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_from_buffer_without_flag() {
        assert_eq!(
            ExceptionResponse::from_buffer(&[0x47, 0x02]),
            Err(ProtocolError::NotAnException(0x47))
        );
    }

    #[test]
    fn test_unregistered_code() {
        // Decoding keeps the raw byte even when the registry has no entry
        let res = ExceptionResponse::from_buffer(&[0xFF, 0x01]).unwrap();
        assert_eq!(res.code(), 0x7F);
        assert!(res.function_code().is_err());
    }

    #[test]
    fn test_to_buffer() {
        let res = ExceptionResponse::new(FunctionCode::WriteFifo8, ExceptionCode::ServerDeviceBusy);
        assert_eq!(res.to_buffer().as_ref(), &[0xC7, 0x06]);

        let res = ExceptionResponse::new(FunctionCode::ReadCoils, 0x03u8);
        assert_eq!(res.to_buffer().as_ref(), &[0x81, 0x03]);
    }

    #[test]
    fn test_exception_code_conversion() {
        for byte in 0u8..=0xFF {
            assert_eq!(u8::from(ExceptionCode::from(byte)), byte);
        }
        assert_eq!(ExceptionCode::from(0x07), ExceptionCode::Other(0x07));
    }

    #[test]
    fn test_exception_code_retryable() {
        assert!(ExceptionCode::ServerDeviceBusy.is_retryable());
        assert!(ExceptionCode::Acknowledge.is_retryable());
        assert!(ExceptionCode::GatewayTargetFailedToRespond.is_retryable());

        assert!(!ExceptionCode::IllegalFunction.is_retryable());
        assert!(!ExceptionCode::IllegalDataAddress.is_retryable());
        assert!(!ExceptionCode::IllegalDataValue.is_retryable());
        assert!(!ExceptionCode::Other(0x42).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExceptionCode::IllegalDataValue.to_string(), "ILLEGAL_DATA_VALUE");
        assert_eq!(ExceptionCode::Other(0x42).to_string(), "EXCEPTION_0x42");

        let res = ExceptionResponse::new(FunctionCode::WriteFifo8, 0x04u8);
        let text = res.to_string();
        assert!(text.contains("0x47"));
        assert!(text.contains("SERVER_DEVICE_FAILURE"));
    }
}
