//! # Ledger Errors
//!
//! This module defines the error types raised by the ledger plumbing itself:
//! the state store and the runtime channel. Contract-specific failures are
//! defined next to each contract and wrap these via `#[from]`.

/// Failure reported by a [`StateStore`](crate::ledger::StateStore) call.
///
/// These are surfaced to the caller unchanged. Retrying is the caller's decision.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),
    #[error("Write conflict on key {0}")]
    Conflict(String),
    #[error("Invalid range: start {start:?} is after end {end:?}")]
    InvalidRange { start: String, end: String },
}

/// Errors that can occur while talking to a [`LedgerRuntime`](crate::ledger::LedgerRuntime).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum LedgerError {
    #[error("Ledger runtime closed")]
    RuntimeClosed,
    #[error("Ledger runtime dropped response channel")]
    RuntimeDropped,
}
