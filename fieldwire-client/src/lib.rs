//! # fieldwire-client
//!
//! Client library for fieldwire.
//!
//! This crate provides:
//! - The `Transport` seam a link layer implements
//! - A `Client` that encodes requests, sends them and dispatches replies

pub mod client;
pub mod error;
pub mod transport;

pub use client::Client;
pub use error::ClientError;
pub use transport::Transport;
