//! # Contract Trait
//!
//! The `Contract` trait is the seam between the ledger runtime and the business
//! logic it hosts. A contract receives a typed request and a state store view,
//! and returns a typed response. The runtime owns everything else: the message
//! loop, the transaction boundary and the commit.
//!
//! Associated types keep each contract's surface strongly typed. An order
//! contract only ever receives `OrderRequest`s and can only ever answer with
//! `OrderResponse`s.

use crate::ledger::error::{LedgerError, StoreError};
use crate::ledger::store::StateStore;
use async_trait::async_trait;
use std::fmt::Debug;

/// Business logic hosted by a [`LedgerRuntime`](crate::ledger::LedgerRuntime).
#[async_trait]
pub trait Contract: Send + Sync + 'static {
    /// The operations this contract exposes.
    type Request: Send + Debug;

    /// The result of a successful operation.
    type Response: Send + Debug;

    /// The contract's error type.
    ///
    /// Must absorb [`StoreError`] (a failing store call, including a failed
    /// commit) and [`LedgerError`] (the runtime channel going away) so that
    /// callers deal with a single error type.
    type Error: std::error::Error + From<StoreError> + From<LedgerError> + Send + Sync + 'static;

    /// Executes one operation against `stub`.
    ///
    /// `stub` is a transaction view: writes become durable only if this returns `Ok`
    /// and the invocation was submitted (not evaluated).
    async fn invoke(
        &self,
        stub: &mut dyn StateStore,
        request: Self::Request,
    ) -> Result<Self::Response, Self::Error>;
}
