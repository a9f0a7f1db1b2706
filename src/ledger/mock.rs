//! # Mock Ledger & Testing Guide
//!
//! `MockClient<C>` hands out a real [`LedgerClient<C>`] whose requests are
//! answered from a queue of canned responses instead of a running contract.
//! It lets you test client wrappers (e.g. `OrderClient`) deterministically and
//! inject failures that are awkward to produce with a real store.
//!
//! ## When to use Mocks vs a Real Runtime
//!
//! | Feature | MockClient | LedgerRuntime |
//! |---------|------------|---------------|
//! | **State** | None (canned responses) | Real store, real transactions |
//! | **Error Injection** | Easy (`return_err`) | Needs a failing store |
//! | **Use Case** | Logic *around* the client | The contract itself, end to end |
//!
//! ## Example
//!
//! ```rust
//! use parts_ledger::ledger::mock::MockClient;
//! use parts_ledger::ledger::StoreError;
//! use parts_ledger::order_contract::{OrderContract, OrderError};
//! use parts_ledger::clients::OrderClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<OrderContract>::new();
//!     mock.expect_submit()
//!         .return_err(OrderError::Store(StoreError::Unavailable("offline".into())));
//!
//!     let client = OrderClient::new(mock.client());
//!     let result = client.update_track_id("123456", "T-99").await;
//!     assert!(matches!(result, Err(OrderError::Store(_))));
//!     mock.verify();
//! }
//! ```
//!
//! ## Low-level helpers
//!
//! Use [`create_mock_client`] with [`expect_submit`] / [`expect_evaluate`] to
//! inspect the exact request a wrapper sent before answering it.

use crate::ledger::client::LedgerClient;
use crate::ledger::contract::Contract;
use crate::ledger::message::{LedgerRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Expected request kind plus the canned answer.
enum Expectation<C: Contract> {
    Submit {
        response: Result<C::Response, C::Error>,
    },
    Evaluate {
        response: Result<C::Response, C::Error>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were declared. A request of the
/// wrong kind (submit vs evaluate) panics the mock task, which the caller
/// observes as `LedgerError::RuntimeDropped`.
pub struct MockClient<C: Contract> {
    client: LedgerClient<C>,
    expectations: Arc<Mutex<VecDeque<Expectation<C>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<C: Contract> Default for MockClient<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Contract> MockClient<C> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<LedgerRequest<C>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        LedgerRequest::Submit { respond_to, .. },
                        Some(Expectation::Submit { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        LedgerRequest::Evaluate { respond_to, .. },
                        Some(Expectation::Evaluate { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: LedgerClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> LedgerClient<C> {
        self.client.clone()
    }

    /// Expects a `submit` call.
    pub fn expect_submit(&mut self) -> ExpectationBuilder<C> {
        ExpectationBuilder {
            kind: Kind::Submit,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `evaluate` call.
    pub fn expect_evaluate(&mut self) -> ExpectationBuilder<C> {
        ExpectationBuilder {
            kind: Kind::Evaluate,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock expectations poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Submit,
    Evaluate,
}

/// Builder returned by [`MockClient::expect_submit`] and [`MockClient::expect_evaluate`].
pub struct ExpectationBuilder<C: Contract> {
    kind: Kind,
    expectations: Arc<Mutex<VecDeque<Expectation<C>>>>,
}

impl<C: Contract> ExpectationBuilder<C> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, response: C::Response) {
        self.push(Ok(response));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: C::Error) {
        self.push(Err(error));
    }

    fn push(self, response: Result<C::Response, C::Error>) {
        let expectation = match self.kind {
            Kind::Submit => Expectation::Submit { response },
            Kind::Evaluate => Expectation::Evaluate { response },
        };
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}

/// Creates a client and the receiving end of its channel.
///
/// Pair with [`expect_submit`] / [`expect_evaluate`] to assert on the raw
/// request before answering through the returned responder.
pub fn create_mock_client<C: Contract>(
    buffer_size: usize,
) -> (LedgerClient<C>, mpsc::Receiver<LedgerRequest<C>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

/// Returns the next request if it is a `Submit`.
pub async fn expect_submit<C: Contract>(
    receiver: &mut mpsc::Receiver<LedgerRequest<C>>,
) -> Option<(C::Request, Response<C>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Submit {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an `Evaluate`.
pub async fn expect_evaluate<C: Contract>(
    receiver: &mut mpsc::Receiver<LedgerRequest<C>>,
) -> Option<(C::Request, Response<C>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Evaluate {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}
