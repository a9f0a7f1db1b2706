//! # Order Contract
//!
//! Business logic for the parts-order ledger, hosted by a
//! [`LedgerRuntime`](crate::ledger::LedgerRuntime).
//!
//! - [`OrderContract`] - Lifecycle, custody/event log and enumeration operations
//! - [`OrderRequest`] / [`OrderResponse`] - The operation surface
//! - [`OrderError`] - Failures reported to callers
//! - [`records`] - Whole-document read/write helpers over a [`StateStore`](crate::ledger::StateStore)

pub mod contract;
mod defaults;
pub mod error;
pub mod records;
pub mod requests;

pub use contract::OrderContract;
pub use error::OrderError;
pub use requests::{OrderRequest, OrderResponse};

use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::ledger::{LedgerClient, LedgerRuntime};
use std::sync::Arc;

/// Creates the runtime hosting an [`OrderContract`] and a client for it.
///
/// The runtime is not started; spawn `runtime.run(store)` with the store to use.
pub fn new(
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
) -> (LedgerRuntime<OrderContract>, LedgerClient<OrderContract>) {
    let capacity = config.channel_capacity;
    LedgerRuntime::new(OrderContract::new(config, clock), capacity)
}
