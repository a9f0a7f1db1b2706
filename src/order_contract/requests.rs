//! Operations exposed by the order contract.
//!
//! Each [`OrderRequest`] variant is one independently invocable operation. The
//! matching [`OrderResponse`] variant is documented on each request.

use crate::ledger::WriteAck;
use crate::model::{OrderEntry, SecondaryIdentifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum OrderRequest {
    /// Seeds the three demonstration records. Answers `Seeded`.
    InitializeDefaultOrders,
    /// Answers `Record` with the serialized new record.
    CreateOrder {
        id: String,
        part_name: String,
        secondary: SecondaryIdentifiers,
    },
    /// Answers `Exists`.
    OrderExists { id: String },
    /// Answers `Written`.
    UpdateOrderStatus { id: String, status: String },
    /// Answers `Written`.
    UpdateEstdDeliveryDate { id: String, date: String },
    /// Answers `Written`.
    UpdateSource { id: String, source: String },
    /// Answers `Written`.
    UpdateAdditionalComments { id: String, comment: String },
    /// Answers `Written`.
    UpdateTrackId { id: String, track_id: String },
    /// Appends to `ChainOfCustody`. Answers `Written`.
    UpdateChainOfCustody { id: String, entry: String },
    /// Products ledger only. Appends to `Events`. Answers `Written`.
    AddEvent { id: String, event: String },
    /// Answers `Record` with the stored document verbatim.
    GetOrderDetails { id: String },
    /// Answers `Log` with `ChainOfCustody` as a JSON array.
    GetChainOfCustody { id: String },
    /// Products ledger only. Answers `Log` with `Events` as a JSON array.
    GetEvents { id: String },
    /// Products ledger only. Answers `Owner`.
    GetCurrentOwner { id: String },
    /// Answers `Orders`.
    GetAllOrders,
}

impl OrderRequest {
    /// The operation's exposed name.
    pub fn name(&self) -> &'static str {
        match self {
            OrderRequest::InitializeDefaultOrders => "InitializeDefaultOrders",
            OrderRequest::CreateOrder { .. } => "CreateOrder",
            OrderRequest::OrderExists { .. } => "OrderExists",
            OrderRequest::UpdateOrderStatus { .. } => "UpdateOrderStatus",
            OrderRequest::UpdateEstdDeliveryDate { .. } => "UpdateEstdDeliveryDate",
            OrderRequest::UpdateSource { .. } => "UpdateSource",
            OrderRequest::UpdateAdditionalComments { .. } => "UpdateAdditionalComments",
            OrderRequest::UpdateTrackId { .. } => "UpdateTrackID",
            OrderRequest::UpdateChainOfCustody { .. } => "UpdateChainOfCustody",
            OrderRequest::AddEvent { .. } => "AddEvent",
            OrderRequest::GetOrderDetails { .. } => "GetOrderDetails",
            OrderRequest::GetChainOfCustody { .. } => "GetChainOfCustody",
            OrderRequest::GetEvents { .. } => "GetEvents",
            OrderRequest::GetCurrentOwner { .. } => "GetCurrentOwner",
            OrderRequest::GetAllOrders => "GetAllOrders",
        }
    }
}

/// Results from [`OrderRequest`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderResponse {
    /// Number of records written by `InitializeDefaultOrders`.
    Seeded(usize),
    /// A serialized order document.
    Record(String),
    Exists(bool),
    /// The store's acknowledgement of a full-record write.
    Written(WriteAck),
    /// A log field serialized as a JSON array of strings.
    Log(String),
    Owner(String),
    Orders(Vec<OrderEntry>),
}
