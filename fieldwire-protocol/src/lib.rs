//! # fieldwire-protocol
//!
//! PDU codec for the fieldbus request/response protocol.
//!
//! This crate provides:
//! - Bounds-checked big-endian frame reading and writing
//! - The function code registry and exception flag convention
//! - `Pdu` / `Request` codec traits implemented once per operation
//! - Reply dispatch into a response or an exception
//! - The Write FIFO 8 (`0x47`) request/response pair

pub mod codec;
pub mod error;
pub mod exception;
pub mod frame;
pub mod function;
pub mod functions;
pub mod message;

pub use codec::dispatch;
pub use error::{ErrorKind, ProtocolError};
pub use exception::{ExceptionCode, ExceptionResponse};
pub use frame::{FrameReader, FrameWriter};
pub use function::{is_exception, FunctionCode, EXCEPTION_FLAG};
pub use functions::{WriteFifo8Options, WriteFifo8Request, WriteFifo8Response};
pub use message::{Pdu, Reply, Request};

/// Maximum PDU size in bytes, function code included.
pub const MAX_PDU_SIZE: usize = 253;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_request_fits_pdu() {
        let req = WriteFifo8Request::new(0, vec![0u8; WriteFifo8Request::MAX_VALUES]).unwrap();
        assert!(req.to_buffer().len() <= MAX_PDU_SIZE);
        assert!(WriteFifo8Request::MAX_VALUES <= u8::MAX as usize);
    }
}
