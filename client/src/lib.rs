//! Client for the on-chain counter program: builds its instructions, sends
//! them through a [`CounterTransport`] and decodes the resulting account.

pub mod args;
pub mod blockhash;
pub mod client;
pub mod driver;
pub mod error;
pub mod instructions;
pub mod transport;

pub use client::{CounterAccount, CounterClient};
pub use error::CounterClientError;
pub use transport::{CounterTransport, RpcTransport, SendError};
