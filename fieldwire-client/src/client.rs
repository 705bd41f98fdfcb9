//! High-level client API.

use crate::error::ClientError;
use crate::transport::Transport;
use bytes::Bytes;
use fieldwire_protocol::{Pdu, Reply, Request, WriteFifo8Request, WriteFifo8Response};
use tracing::{debug, warn};

/// Encodes requests, hands them to a [`Transport`] and dispatches replies.
pub struct Client<T> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Sends `request` and returns the peer's response or exception.
    ///
    /// Exception replies are returned as [`Reply::Exception`], not as errors.
    pub async fn execute<R: Request>(
        &self,
        request: &R,
    ) -> Result<Reply<R::Response>, ClientError> {
        let pdu = request.encode();
        debug!(
            code = R::FUNCTION_CODE.as_u8(),
            len = pdu.len(),
            "sending request"
        );

        let reply = self.transport.send(pdu).await?;
        let reply = request.create_response(&reply)?;

        if let Reply::Exception(exc) = &reply {
            warn!(
                code = exc.code(),
                exception = %exc.kind(),
                "peer returned exception"
            );
        }

        Ok(reply)
    }

    /// Sends `request`, treating an exception reply as an error.
    pub async fn call<R: Request>(&self, request: &R) -> Result<R::Response, ClientError> {
        self.execute(request)
            .await?
            .into_result()
            .map_err(|exc| ClientError::Exception {
                code: exc.code(),
                exception: exc.kind(),
            })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Writes `values` into FIFO `id`.
    pub async fn write_fifo8(
        &self,
        id: u8,
        values: impl Into<Bytes>,
    ) -> Result<WriteFifo8Response, ClientError> {
        let request = WriteFifo8Request::new(i64::from(id), values)?;
        self.call(&request).await
    }
}
