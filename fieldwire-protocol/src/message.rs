//! Codec traits shared by every request/response pair.

use crate::codec::dispatch;
use crate::error::ProtocolError;
use crate::exception::ExceptionResponse;
use crate::function::FunctionCode;
use bytes::Bytes;
use serde::Serialize;

/// A PDU with a fixed function code and a binary layout.
pub trait Pdu: Sized {
    /// Function code carried in byte 0.
    const FUNCTION_CODE: FunctionCode;

    /// Encodes into a freshly allocated, exactly sized frame.
    fn encode(&self) -> Bytes;

    /// Decodes from a frame whose byte 0 must be [`Self::FUNCTION_CODE`].
    fn decode(frame: &[u8]) -> Result<Self, ProtocolError>;

    fn function_code(&self) -> FunctionCode {
        Self::FUNCTION_CODE
    }
}

/// A request PDU paired with the response it expects.
///
/// `Self::Response` must share the request's function code.
pub trait Request: Pdu {
    type Response: Pdu;

    /// Turns the peer's reply into either this operation's response or an
    /// exception.
    fn create_response(&self, reply: &[u8]) -> Result<Reply<Self::Response>, ProtocolError> {
        dispatch::<Self::Response>(Self::FUNCTION_CODE, reply)
    }
}

/// Outcome of dispatching a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply<R> {
    Response(R),
    Exception(ExceptionResponse),
}

impl<R> Reply<R> {
    pub fn is_response(&self) -> bool {
        matches!(self, Reply::Response(_))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, Reply::Exception(_))
    }

    pub fn response(&self) -> Option<&R> {
        match self {
            Reply::Response(res) => Some(res),
            Reply::Exception(_) => None,
        }
    }

    pub fn exception(&self) -> Option<&ExceptionResponse> {
        match self {
            Reply::Response(_) => None,
            Reply::Exception(exc) => Some(exc),
        }
    }

    /// Converts into a `Result`, treating the exception as the error side.
    pub fn into_result(self) -> Result<R, ExceptionResponse> {
        match self {
            Reply::Response(res) => Ok(res),
            Reply::Exception(exc) => Err(exc),
        }
    }
}
