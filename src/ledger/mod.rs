//! Ledger plumbing: the state store contract and the runtime that hosts contracts.
//!
//! # Main Components
//!
//! - [`StateStore`] - Key-value primitives (`get_state`, `put_state`, `get_state_by_range`)
//! - [`MemoryStore`] - Ordered in-memory store
//! - [`Transaction`] - Buffered write set for one invocation
//! - [`Contract`] - Trait implemented by hosted business logic
//! - [`LedgerRuntime`] / [`LedgerClient`] - Sequential invocation loop and its handle
//! - [`StoreError`], [`LedgerError`] - Store and channel failures
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without running a contract.

pub mod client;
pub mod contract;
pub mod error;
pub mod message;
pub mod mock;
pub mod runtime;
pub mod store;
pub mod transaction;

// Re-export core types for convenience
pub use client::LedgerClient;
pub use contract::Contract;
pub use error::{LedgerError, StoreError};
pub use message::{LedgerRequest, Response};
pub use runtime::LedgerRuntime;
pub use store::{KeyValue, MemoryStore, StateIterator, StateStore, WriteAck};
pub use transaction::Transaction;
