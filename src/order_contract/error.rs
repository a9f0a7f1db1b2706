//! Error types for the order contract.

use crate::config::Variant;
use crate::ledger::{LedgerError, StoreError};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// The two not-found messages differ by call path and are kept verbatim:
/// update and append operations report [`OrderError::AssetNotFound`], reads
/// report [`OrderError::OrderNotFound`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// An update or append targeted an id with no stored value.
    #[error("The asset {0} does not exist")]
    AssetNotFound(String),

    /// A read targeted an id with no stored value.
    #[error("The order with Order ID: {0} does not exist")]
    OrderNotFound(String),

    /// `CreateOrder` hit an existing id under the reject-if-exists policy.
    #[error("The order {0} already exists")]
    AlreadyExists(String),

    /// `GetCurrentOwner` on a record whose custody chain is empty.
    #[error("The order {0} has no custodian on record")]
    EmptyCustodyChain(String),

    /// The operation does not exist in the configured ledger variant.
    #[error("{operation} is not available in the {variant} ledger")]
    UnsupportedOperation {
        operation: &'static str,
        variant: Variant,
    },

    /// A stored record could not be decoded or a record could not be encoded.
    #[error("Order {id} could not be encoded: {reason}")]
    Encoding { id: String, reason: String },

    /// The state store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The ledger runtime could not be reached.
    #[error(transparent)]
    Runtime(#[from] LedgerError),
}

impl OrderError {
    pub(crate) fn encoding(id: &str, e: serde_json::Error) -> Self {
        OrderError::Encoding {
            id: id.to_string(),
            reason: e.to_string(),
        }
    }

    /// True for either not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderError::AssetNotFound(_) | OrderError::OrderNotFound(_)
        )
    }
}
