//! Reply dispatch.

use crate::error::ProtocolError;
use crate::exception::ExceptionResponse;
use crate::function::{FunctionCode, FUNCTION_CODE_MASK};
use crate::message::{Pdu, Reply};
use tracing::{debug, trace};

/// Decides whether `reply` answers a request with function code `expected`
/// normally or with an exception, and decodes it accordingly.
///
/// A reply whose code matches neither `expected` nor its exception-flagged
/// form is rejected; it is never reinterpreted as another operation.
pub fn dispatch<R: Pdu>(expected: FunctionCode, reply: &[u8]) -> Result<Reply<R>, ProtocolError> {
    let Some(&actual) = reply.first() else {
        return Err(ProtocolError::TruncatedFrame {
            needed: 1,
            actual: 0,
        });
    };

    if expected.is_exception_of(actual) {
        let exc = ExceptionResponse::from_buffer(reply)?;
        debug!(
            code = expected.as_u8(),
            exception = exc.exception_code(),
            "dispatched exception reply"
        );
        return Ok(Reply::Exception(exc));
    }

    if actual == expected.as_u8() {
        let res = R::decode(reply)?;
        trace!(code = actual, len = reply.len(), "dispatched response");
        return Ok(Reply::Response(res));
    }

    debug!(
        expected = expected.as_u8(),
        actual,
        masked = actual & FUNCTION_CODE_MASK,
        "reply does not answer this request"
    );
    Err(ProtocolError::FunctionCodeMismatch {
        expected: expected.as_u8(),
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WriteFifo8Response;

    #[test]
    fn test_dispatch_response() {
        let reply = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0x47, 0x01]).unwrap();
        assert_eq!(reply.response().unwrap().quantity(), 1);
    }

    #[test]
    fn test_dispatch_exception() {
        let reply = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0xC7, 0x02]).unwrap();
        let exc = reply.exception().unwrap();
        assert_eq!(exc.code(), 0x47);
        assert_eq!(exc.exception_code(), 2);
    }

    #[test]
    fn test_dispatch_empty_reply() {
        let result = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[]);
        assert!(matches!(result, Err(ProtocolError::TruncatedFrame { .. })));
    }

    #[test]
    fn test_dispatch_mismatch() {
        let result = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0x03, 0x02]);
        assert_eq!(
            result,
            Err(ProtocolError::FunctionCodeMismatch {
                expected: 0x47,
                actual: 0x03
            })
        );
    }

    #[test]
    fn test_dispatch_exception_for_other_code() {
        // An exception for a different operation is a mismatch, not an exception
        let result = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0x83, 0x02]);
        assert_eq!(
            result,
            Err(ProtocolError::FunctionCodeMismatch {
                expected: 0x47,
                actual: 0x83
            })
        );
    }

    #[test]
    fn test_dispatch_truncated_exception() {
        let result = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0xC7]);
        assert!(matches!(
            result,
            Err(ProtocolError::TruncatedFrame {
                needed: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_dispatch_truncated_response() {
        let result = dispatch::<WriteFifo8Response>(FunctionCode::WriteFifo8, &[0x47]);
        assert!(matches!(
            result,
            Err(ProtocolError::TruncatedFrame {
                needed: 2,
                actual: 1
            })
        ));
    }
}
