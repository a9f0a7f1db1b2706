//! # Ledger Runtime
//!
//! This module defines the `LedgerRuntime`, the in-process stand-in for the
//! ledger that hosts a [`Contract`]. It owns the state store for the lifetime of
//! its task and processes invocations strictly one at a time, so every
//! invocation is its own transaction boundary.

use crate::ledger::client::LedgerClient;
use crate::ledger::contract::Contract;
use crate::ledger::message::LedgerRequest;
use crate::ledger::store::StateStore;
use crate::ledger::transaction::Transaction;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Hosts a contract and serialises invocations against a state store.
///
/// # Usage Pattern
///
/// 1.  **Create**: `LedgerRuntime::new(contract, capacity)` returns the runtime and a client.
/// 2.  **Run**: spawn `runtime.run(store)`. The store is injected here, not at construction.
/// 3.  **Use**: clone the client freely and `submit`/`evaluate` requests.
///
/// ```rust
/// use std::sync::Arc;
/// use parts_ledger::clock::SystemClock;
/// use parts_ledger::config::LedgerConfig;
/// use parts_ledger::ledger::{LedgerRuntime, MemoryStore};
/// use parts_ledger::order_contract::{OrderContract, OrderRequest, OrderResponse};
///
/// #[tokio::main]
/// async fn main() {
///     let contract = OrderContract::new(LedgerConfig::default(), Arc::new(SystemClock));
///     let (runtime, client) = LedgerRuntime::new(contract, 8);
///     tokio::spawn(runtime.run(MemoryStore::new()));
///
///     let exists = client
///         .evaluate(OrderRequest::OrderExists { id: "123456".into() })
///         .await
///         .unwrap();
///     assert_eq!(exists, OrderResponse::Exists(false));
/// }
/// ```
///
/// # Transactions
///
/// * **Submit**: the contract runs against a [`Transaction`]; on `Ok` the write set is
///   committed, on `Err` it is dropped and the store is untouched.
/// * **Evaluate**: same, but the write set is always dropped.
pub struct LedgerRuntime<C: Contract> {
    receiver: mpsc::Receiver<LedgerRequest<C>>,
    contract: C,
}

impl<C: Contract> LedgerRuntime<C> {
    /// Creates a new `LedgerRuntime` and its associated `LedgerClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(contract: C, buffer_size: usize) -> (Self, LedgerClient<C>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let runtime = Self { receiver, contract };
        (runtime, LedgerClient::new(sender))
    }

    /// Runs the invocation loop until every client has been dropped.
    ///
    /// Returns the store once the loop exits.
    pub async fn run<S: StateStore>(mut self, mut store: S) -> S {
        // Extract just the type name (e.g., "OrderContract")
        let contract_type = std::any::type_name::<C>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(contract_type, "Runtime started");

        let mut committed = 0usize;
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Submit {
                    request,
                    respond_to,
                } => {
                    debug!(contract_type, ?request, "Submit");
                    let mut tx = Transaction::new(&mut store);
                    let result = match self.contract.invoke(&mut tx, request).await {
                        Ok(response) => match tx.commit().await {
                            Ok(writes) => {
                                committed += writes;
                                info!(contract_type, writes, "Committed");
                                Ok(response)
                            }
                            Err(e) => {
                                warn!(contract_type, error = %e, "Commit failed");
                                Err(C::Error::from(e))
                            }
                        },
                        Err(e) => {
                            warn!(contract_type, error = %e, "Invocation failed");
                            Err(e)
                        }
                    };
                    let _ = respond_to.send(result);
                }
                LedgerRequest::Evaluate {
                    request,
                    respond_to,
                } => {
                    debug!(contract_type, ?request, "Evaluate");
                    let mut tx = Transaction::new(&mut store);
                    let result = self.contract.invoke(&mut tx, request).await;
                    if let Err(e) = &result {
                        warn!(contract_type, error = %e, "Evaluation failed");
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(contract_type, committed, "Shutdown");
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::error::{LedgerError, StoreError};
    use crate::ledger::store::MemoryStore;
    use async_trait::async_trait;

    // --- A scratch contract that writes before deciding whether to fail ---

    struct ScratchContract;

    #[derive(Debug)]
    enum ScratchRequest {
        Write { key: String, fail_after: bool },
        Read { key: String },
    }

    #[derive(Debug, PartialEq)]
    enum ScratchResponse {
        Written,
        Value(Option<Vec<u8>>),
    }

    #[derive(Debug, thiserror::Error)]
    enum ScratchError {
        #[error("rejected after writing")]
        Rejected,
        #[error(transparent)]
        Store(#[from] StoreError),
        #[error(transparent)]
        Ledger(#[from] LedgerError),
    }

    #[async_trait]
    impl Contract for ScratchContract {
        type Request = ScratchRequest;
        type Response = ScratchResponse;
        type Error = ScratchError;

        async fn invoke(
            &self,
            stub: &mut dyn StateStore,
            request: ScratchRequest,
        ) -> Result<ScratchResponse, ScratchError> {
            match request {
                ScratchRequest::Write { key, fail_after } => {
                    stub.put_state(&key, b"written".to_vec()).await?;
                    if fail_after {
                        return Err(ScratchError::Rejected);
                    }
                    Ok(ScratchResponse::Written)
                }
                ScratchRequest::Read { key } => {
                    Ok(ScratchResponse::Value(stub.get_state(&key).await?))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_submit_commits_and_failure_rolls_back() {
        let (runtime, client) = LedgerRuntime::new(ScratchContract, 4);
        let handle = tokio::spawn(runtime.run(MemoryStore::new()));

        client
            .submit(ScratchRequest::Write { key: "kept".into(), fail_after: false })
            .await
            .unwrap();
        let failed = client
            .submit(ScratchRequest::Write { key: "lost".into(), fail_after: true })
            .await;
        assert!(matches!(failed, Err(ScratchError::Rejected)));

        let kept = client.evaluate(ScratchRequest::Read { key: "kept".into() }).await.unwrap();
        assert_eq!(kept, ScratchResponse::Value(Some(b"written".to_vec())));
        let lost = client.evaluate(ScratchRequest::Read { key: "lost".into() }).await.unwrap();
        assert_eq!(lost, ScratchResponse::Value(None));

        drop(client);
        let store = handle.await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_never_commits() {
        let (runtime, client) = LedgerRuntime::new(ScratchContract, 4);
        let handle = tokio::spawn(runtime.run(MemoryStore::new()));

        let response = client
            .evaluate(ScratchRequest::Write { key: "probe".into(), fail_after: false })
            .await
            .unwrap();
        assert_eq!(response, ScratchResponse::Written);

        drop(client);
        let store = handle.await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_closed_runtime_reports_ledger_error() {
        let (runtime, client) = LedgerRuntime::new(ScratchContract, 4);
        drop(runtime);

        let result = client.evaluate(ScratchRequest::Read { key: "k".into() }).await;
        assert!(matches!(result, Err(ScratchError::Ledger(LedgerError::RuntimeClosed))));
    }
}
