//! Request/response pairs, one module per operation.

pub mod write_fifo8;

pub use write_fifo8::{WriteFifo8Options, WriteFifo8Request, WriteFifo8Response};
