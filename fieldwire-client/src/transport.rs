//! Transport seam.
//!
//! A transport carries one request PDU to the peer and returns the reply
//! PDU. Link-layer framing, request correlation, timeouts and retries live
//! behind this trait.

use crate::error::ClientError;
use bytes::Bytes;
use std::future::Future;

pub trait Transport: Send + Sync {
    /// Sends a request PDU and resolves with the peer's reply PDU.
    fn send(&self, pdu: Bytes) -> impl Future<Output = Result<Bytes, ClientError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, pdu: Bytes) -> impl Future<Output = Result<Bytes, ClientError>> + Send {
        (**self).send(pdu)
    }
}
