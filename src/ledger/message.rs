//! # Ledger Messages
//!
//! Message types exchanged between a [`LedgerClient`](crate::ledger::LedgerClient)
//! and a [`LedgerRuntime`](crate::ledger::LedgerRuntime).

use crate::ledger::contract::Contract;
use tokio::sync::oneshot;

/// One-shot channel carrying a contract's result back to the caller.
pub type Response<C> =
    oneshot::Sender<Result<<C as Contract>::Response, <C as Contract>::Error>>;

/// Request sent to the runtime.
///
/// - **Submit**: runs the operation in a transaction and commits its writes on success.
/// - **Evaluate**: runs the operation in a transaction and always discards its writes.
///   Used for queries.
#[derive(Debug)]
pub enum LedgerRequest<C: Contract> {
    Submit {
        request: C::Request,
        respond_to: Response<C>,
    },
    Evaluate {
        request: C::Request,
        respond_to: Response<C>,
    },
}
