//! Typed wrappers around [`LedgerClient`](crate::ledger::LedgerClient).

pub mod order_client;

pub use order_client::*;
