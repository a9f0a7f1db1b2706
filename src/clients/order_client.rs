use crate::ledger::LedgerClient;
use crate::model::{Order, OrderEntry, SecondaryIdentifiers};
use crate::order_contract::{OrderContract, OrderError, OrderRequest, OrderResponse};
use tracing::{debug, instrument};

/// Typed client for the order contract.
///
/// Mutating operations go through `submit` and are committed; reads go through
/// `evaluate` and never change the ledger.
#[derive(Clone)]
pub struct OrderClient {
    inner: LedgerClient<OrderContract>,
}

impl OrderClient {
    pub fn new(inner: LedgerClient<OrderContract>) -> Self {
        Self { inner }
    }

    /// Writes the three demonstration records, returning how many were written.
    #[instrument(skip(self))]
    pub async fn initialize_default_orders(&self) -> Result<usize, OrderError> {
        debug!("Sending request");
        match self.inner.submit(OrderRequest::InitializeDefaultOrders).await? {
            OrderResponse::Seeded(count) => Ok(count),
            _ => unreachable!("InitializeDefaultOrders must return Seeded"),
        }
    }

    /// Creates (or, under the default policy, replaces) the record under `id`.
    ///
    /// Returns the serialized record.
    #[instrument(skip(self))]
    pub async fn create_order(&self, id: &str, part_name: &str) -> Result<String, OrderError> {
        self.create(id, part_name, SecondaryIdentifiers::default())
            .await
    }

    /// Products-ledger creation carrying the secondary identifiers.
    #[instrument(skip(self))]
    pub async fn create_product_order(
        &self,
        id: &str,
        part_name: &str,
        secondary: SecondaryIdentifiers,
    ) -> Result<String, OrderError> {
        self.create(id, part_name, secondary).await
    }

    async fn create(
        &self,
        id: &str,
        part_name: &str,
        secondary: SecondaryIdentifiers,
    ) -> Result<String, OrderError> {
        debug!("Sending request");
        let request = OrderRequest::CreateOrder {
            id: id.to_string(),
            part_name: part_name.to_string(),
            secondary,
        };
        match self.inner.submit(request).await? {
            OrderResponse::Record(document) => Ok(document),
            _ => unreachable!("CreateOrder must return Record"),
        }
    }

    #[instrument(skip(self))]
    pub async fn order_exists(&self, id: &str) -> Result<bool, OrderError> {
        let request = OrderRequest::OrderExists { id: id.to_string() };
        match self.inner.evaluate(request).await? {
            OrderResponse::Exists(exists) => Ok(exists),
            _ => unreachable!("OrderExists must return Exists"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: &str, status: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateOrderStatus {
            id: id.to_string(),
            status: status.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_estd_delivery_date(&self, id: &str, date: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateEstdDeliveryDate {
            id: id.to_string(),
            date: date.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_source(&self, id: &str, source: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateSource {
            id: id.to_string(),
            source: source.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_additional_comments(
        &self,
        id: &str,
        comment: &str,
    ) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateAdditionalComments {
            id: id.to_string(),
            comment: comment.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_track_id(&self, id: &str, track_id: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateTrackId {
            id: id.to_string(),
            track_id: track_id.to_string(),
        })
        .await
    }

    /// Appends one entry to the custody chain.
    #[instrument(skip(self))]
    pub async fn update_chain_of_custody(&self, id: &str, entry: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::UpdateChainOfCustody {
            id: id.to_string(),
            entry: entry.to_string(),
        })
        .await
    }

    /// Appends one entry to the event log. Products ledger only.
    #[instrument(skip(self))]
    pub async fn add_event(&self, id: &str, event: &str) -> Result<(), OrderError> {
        self.write(OrderRequest::AddEvent {
            id: id.to_string(),
            event: event.to_string(),
        })
        .await
    }

    async fn write(&self, request: OrderRequest) -> Result<(), OrderError> {
        debug!(operation = request.name(), "Sending request");
        match self.inner.submit(request).await? {
            OrderResponse::Written(_) => Ok(()),
            _ => unreachable!("update and append operations must return Written"),
        }
    }

    /// The stored document, verbatim.
    #[instrument(skip(self))]
    pub async fn get_order_details(&self, id: &str) -> Result<String, OrderError> {
        let request = OrderRequest::GetOrderDetails { id: id.to_string() };
        match self.inner.evaluate(request).await? {
            OrderResponse::Record(document) => Ok(document),
            _ => unreachable!("GetOrderDetails must return Record"),
        }
    }

    /// [`get_order_details`](Self::get_order_details) decoded into an [`Order`].
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> Result<Order, OrderError> {
        let document = self.get_order_details(id).await?;
        Order::from_slice(document.as_bytes()).map_err(|e| OrderError::encoding(id, e))
    }

    /// The custody chain as a JSON array.
    #[instrument(skip(self))]
    pub async fn get_chain_of_custody(&self, id: &str) -> Result<String, OrderError> {
        self.read_log(OrderRequest::GetChainOfCustody { id: id.to_string() })
            .await
    }

    /// The event log as a JSON array. Products ledger only.
    #[instrument(skip(self))]
    pub async fn get_events(&self, id: &str) -> Result<String, OrderError> {
        self.read_log(OrderRequest::GetEvents { id: id.to_string() })
            .await
    }

    async fn read_log(&self, request: OrderRequest) -> Result<String, OrderError> {
        match self.inner.evaluate(request).await? {
            OrderResponse::Log(entries) => Ok(entries),
            _ => unreachable!("log reads must return Log"),
        }
    }

    /// Last entry of the custody chain. Products ledger only.
    #[instrument(skip(self))]
    pub async fn get_current_owner(&self, id: &str) -> Result<String, OrderError> {
        let request = OrderRequest::GetCurrentOwner { id: id.to_string() };
        match self.inner.evaluate(request).await? {
            OrderResponse::Owner(owner) => Ok(owner),
            _ => unreachable!("GetCurrentOwner must return Owner"),
        }
    }

    /// Every stored record in key order.
    #[instrument(skip(self))]
    pub async fn get_all_orders(&self) -> Result<Vec<OrderEntry>, OrderError> {
        match self.inner.evaluate(OrderRequest::GetAllOrders).await? {
            OrderResponse::Orders(entries) => Ok(entries),
            _ => unreachable!("GetAllOrders must return Orders"),
        }
    }
}
