//! Protocol error types and error classification.

use std::fmt;
use thiserror::Error;

/// Errors raised while building, encoding, decoding or dispatching PDUs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("id out of range: {0} (expected 0..=255)")]
    IdOutOfRange(i64),

    #[error("values length out of range: {len} bytes (expected {min}..={max})")]
    ValuesLength { len: usize, min: usize, max: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("truncated frame: need {needed} bytes, got {actual}")]
    TruncatedFrame { needed: usize, actual: usize },

    #[error("function code mismatch: expected {expected:#04x}, got {actual:#04x}")]
    FunctionCodeMismatch { expected: u8, actual: u8 },

    #[error("unknown function code: {0:#04x}")]
    UnknownFunctionCode(u8),

    #[error("not an exception response: {0:#04x} has no exception flag")]
    NotAnException(u8),
}

impl ProtocolError {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtocolError::IdOutOfRange(_)
            | ProtocolError::ValuesLength { .. }
            | ProtocolError::InvalidOptions(_) => ErrorKind::Validation,
            ProtocolError::TruncatedFrame { .. } => ErrorKind::TruncatedFrame,
            ProtocolError::FunctionCodeMismatch { .. }
            | ProtocolError::UnknownFunctionCode(_)
            | ProtocolError::NotAnException(_) => ErrorKind::Protocol,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_truncated(&self) -> bool {
        self.kind() == ErrorKind::TruncatedFrame
    }

    pub fn is_protocol(&self) -> bool {
        self.kind() == ErrorKind::Protocol
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::InvalidOptions(err.to_string())
    }
}

/// Coarse classification of [`ProtocolError`].
///
/// Application parameters that fail validation, buffers shorter than their
/// declared length, and function-code disagreements are reported through
/// distinct kinds so callers can react without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    TruncatedFrame,
    Protocol,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION"),
            ErrorKind::TruncatedFrame => write!(f, "TRUNCATED_FRAME"),
            ErrorKind::Protocol => write!(f, "PROTOCOL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(ProtocolError::IdOutOfRange(256).kind(), ErrorKind::Validation);
        assert_eq!(
            ProtocolError::ValuesLength {
                len: 0,
                min: 1,
                max: 250
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ProtocolError::InvalidOptions("missing field `id`".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ProtocolError::TruncatedFrame {
                needed: 4,
                actual: 3
            }
            .kind(),
            ErrorKind::TruncatedFrame
        );
        assert_eq!(
            ProtocolError::FunctionCodeMismatch {
                expected: 0x47,
                actual: 0x03
            }
            .kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            ProtocolError::UnknownFunctionCode(0x7F).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(ProtocolError::NotAnException(0x47).kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_error_kind_predicates() {
        let err = ProtocolError::TruncatedFrame {
            needed: 5,
            actual: 2,
        };
        assert!(err.is_truncated());
        assert!(!err.is_validation());
        assert!(!err.is_protocol());
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Validation), "VALIDATION");
        assert_eq!(format!("{}", ErrorKind::TruncatedFrame), "TRUNCATED_FRAME");
        assert_eq!(format!("{}", ErrorKind::Protocol), "PROTOCOL");
    }

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::IdOutOfRange(-1);
        assert!(err.to_string().contains("-1"));

        let err = ProtocolError::ValuesLength {
            len: 251,
            min: 1,
            max: 250,
        };
        let msg = err.to_string();
        assert!(msg.contains("251"));
        assert!(msg.contains("250"));

        let err = ProtocolError::TruncatedFrame {
            needed: 10,
            actual: 4,
        };
        assert!(err.to_string().contains("10"));

        // Codes render as zero-padded hex
        let err = ProtocolError::FunctionCodeMismatch {
            expected: 0x47,
            actual: 0x03,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x47"));
        assert!(msg.contains("0x03"));

        let err = ProtocolError::NotAnException(0x47);
        assert!(err.to_string().contains("0x47"));
    }

    #[test]
    fn test_json_error_is_validation() {
        let json_err = serde_json::from_str::<u8>("\"nope\"").unwrap_err();
        let err: ProtocolError = json_err.into();
        assert!(err.is_validation());
    }
}
