//! # Ledger Client
//!
//! This module defines the generic client for invoking a contract hosted by a
//! [`LedgerRuntime`](crate::ledger::LedgerRuntime).

use crate::ledger::contract::Contract;
use crate::ledger::error::LedgerError;
use crate::ledger::message::LedgerRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for invoking a contract.
///
/// Holds only a channel sender, so cloning is cheap and clones can be shared
/// across tasks. Channel failures surface as the contract's own error type via
/// `From<LedgerError>`.
pub struct LedgerClient<C: Contract> {
    sender: mpsc::Sender<LedgerRequest<C>>,
}

impl<C: Contract> Clone for LedgerClient<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C: Contract> LedgerClient<C> {
    pub fn new(sender: mpsc::Sender<LedgerRequest<C>>) -> Self {
        Self { sender }
    }

    /// Invokes `request` and commits its writes if it succeeds.
    pub async fn submit(&self, request: C::Request) -> Result<C::Response, C::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Submit {
                request,
                respond_to,
            })
            .await
            .map_err(|_| C::Error::from(LedgerError::RuntimeClosed))?;
        response
            .await
            .map_err(|_| C::Error::from(LedgerError::RuntimeDropped))?
    }

    /// Invokes `request` as a query. Any writes it makes are discarded.
    pub async fn evaluate(&self, request: C::Request) -> Result<C::Response, C::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Evaluate {
                request,
                respond_to,
            })
            .await
            .map_err(|_| C::Error::from(LedgerError::RuntimeClosed))?;
        response
            .await
            .map_err(|_| C::Error::from(LedgerError::RuntimeDropped))?
    }
}
