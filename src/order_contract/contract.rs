//! [`Contract`] implementation for order records.
//!
//! Every mutating operation has the same shape: check the record exists, read
//! the whole document, change exactly one field (or append one log entry),
//! write the whole document back. The store only supports whole-value
//! overwrite, so a partial write is never attempted. Edits work on the raw JSON
//! object, so keys this crate does not know about are written back unchanged.

use crate::clock::Clock;
use crate::config::{CreatePolicy, LedgerConfig, Variant};
use crate::ledger::{Contract, StateStore, WriteAck};
use crate::model::{
    Document, MutableField, Order, OrderEntry, OrderLog, RecordValue, SecondaryIdentifiers,
    DOC_TYPE,
};
use crate::order_contract::defaults::DEFAULT_ORDERS;
use crate::order_contract::records::{
    order_exists, read_document, read_order, read_order_bytes, write_document, write_order,
};
use crate::order_contract::{OrderError, OrderRequest, OrderResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The order lifecycle manager, custody/event log and enumeration service.
///
/// Holds no record state between invocations. Every operation re-reads from
/// the store it is handed.
pub struct OrderContract {
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl OrderContract {
    pub fn new(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn require_products(&self, operation: &'static str) -> Result<(), OrderError> {
        match self.config.variant {
            Variant::Products => Ok(()),
            variant => Err(OrderError::UnsupportedOperation { operation, variant }),
        }
    }

    /// A freshly received record stamped with the clock's current time.
    ///
    /// Orders ledger: the custody chain starts with the status narrative.
    /// Products ledger: `Events` starts with the narrative and the custody chain
    /// with the configured initial custodian.
    fn received(&self, id: &str, part_name: &str, secondary: SecondaryIdentifiers) -> Order {
        let timestamp = self.clock.timestamp();
        let narrative = format!("Order received to SDLC parts [{timestamp}]");
        let sentinel = &self.config.sentinel;

        let (secondary, events, chain_of_custody) = match self.config.variant {
            Variant::Orders => (SecondaryIdentifiers::default(), None, vec![narrative.clone()]),
            Variant::Products => (
                secondary,
                Some(vec![narrative.clone()]),
                vec![self.config.initial_custodian.clone()],
            ),
        };

        Order {
            id: id.to_string(),
            secondary,
            status: narrative,
            part_name: part_name.to_string(),
            events,
            chain_of_custody,
            time_stamp_part_ordered: timestamp,
            estimated_delivery_date: sentinel.clone(),
            source: sentinel.clone(),
            additional_comments: sentinel.clone(),
            track_id: sentinel.clone(),
            contact_custodian: Some(sentinel.clone()),
            contact_vendor: Some(sentinel.clone()),
            doc_type: DOC_TYPE.to_string(),
            extra: Document::new(),
        }
    }

    async fn initialize_default_orders(
        &self,
        stub: &mut dyn StateStore,
    ) -> Result<usize, OrderError> {
        for seed in &DEFAULT_ORDERS {
            let [unit, sales_order, part] = seed.secondary;
            let mut order = self.received(
                seed.id,
                seed.part_name,
                SecondaryIdentifiers::new(unit, sales_order, part),
            );
            if self.config.variant == Variant::Products && !seed.custody.is_empty() {
                order.chain_of_custody = seed.custody.iter().map(|c| c.to_string()).collect();
            }
            write_order(stub, &order).await?;
            info!(id = seed.id, "Order initialized");
        }
        Ok(DEFAULT_ORDERS.len())
    }

    async fn create_order(
        &self,
        stub: &mut dyn StateStore,
        id: String,
        part_name: String,
        secondary: SecondaryIdentifiers,
    ) -> Result<String, OrderError> {
        if self.config.create_policy == CreatePolicy::RejectIfExists
            && order_exists(stub, &id).await?
        {
            return Err(OrderError::AlreadyExists(id));
        }
        if self.config.variant == Variant::Orders && !secondary.is_empty() {
            warn!(%id, "Secondary identifiers are not kept by the orders ledger");
        }

        let order = self.received(&id, &part_name, secondary);
        let document = order.to_json().map_err(|e| OrderError::encoding(&id, e))?;
        stub.put_state(&id, document.clone().into_bytes()).await?;
        info!(%id, %part_name, "Order created");
        Ok(document)
    }

    /// Update-path read: existence is checked first so a missing id reports `AssetNotFound`.
    async fn load_for_update(&self, stub: &dyn StateStore, id: &str) -> Result<Document, OrderError> {
        if !order_exists(stub, id).await? {
            return Err(OrderError::AssetNotFound(id.to_string()));
        }
        read_document(stub, id).await
    }

    async fn update_field(
        &self,
        stub: &mut dyn StateStore,
        id: String,
        field: MutableField,
        value: String,
    ) -> Result<WriteAck, OrderError> {
        let mut document = self.load_for_update(stub, &id).await?;
        field.apply(&mut document, value);
        debug!(%id, ?field, "Field updated");
        write_document(stub, &id, &document).await
    }

    async fn append(
        &self,
        stub: &mut dyn StateStore,
        id: String,
        log: OrderLog,
        entry: String,
    ) -> Result<WriteAck, OrderError> {
        let mut document = self.load_for_update(stub, &id).await?;
        let length = log
            .append(&mut document, entry)
            .ok_or_else(|| OrderError::Encoding {
                id: id.clone(),
                reason: format!("{} is not a list", log.key()),
            })?;
        debug!(%id, ?log, length, "Log appended");
        write_document(stub, &id, &document).await
    }

    async fn get_order_details(&self, stub: &dyn StateStore, id: &str) -> Result<String, OrderError> {
        let bytes = read_order_bytes(stub, id).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn get_log(
        &self,
        stub: &dyn StateStore,
        id: &str,
        log: OrderLog,
    ) -> Result<String, OrderError> {
        let order = read_order(stub, id).await?;
        serde_json::to_string(log.entries(&order)).map_err(|e| OrderError::encoding(id, e))
    }

    async fn get_current_owner(&self, stub: &dyn StateStore, id: &str) -> Result<String, OrderError> {
        let order = read_order(stub, id).await?;
        order
            .current_custodian()
            .map(str::to_string)
            .ok_or_else(|| OrderError::EmptyCustodyChain(id.to_string()))
    }

    /// Full-range scan. A value that does not decode is returned raw rather than
    /// failing the scan.
    async fn get_all_orders(&self, stub: &dyn StateStore) -> Result<Vec<OrderEntry>, OrderError> {
        let mut entries = Vec::new();
        for kv in stub.get_state_by_range("", "").await? {
            let (record, error) = RecordValue::decode(&kv.value);
            if let Some(e) = error {
                warn!(key = %kv.key, error = %e, "Stored value is not an order; returning it raw");
            }
            entries.push(OrderEntry {
                key: kv.key,
                record,
            });
        }
        debug!(count = entries.len(), "Scanned orders");
        Ok(entries)
    }
}

#[async_trait]
impl Contract for OrderContract {
    type Request = OrderRequest;
    type Response = OrderResponse;
    type Error = OrderError;

    async fn invoke(
        &self,
        stub: &mut dyn StateStore,
        request: OrderRequest,
    ) -> Result<OrderResponse, OrderError> {
        let operation = request.name();
        match request {
            OrderRequest::InitializeDefaultOrders => self
                .initialize_default_orders(stub)
                .await
                .map(OrderResponse::Seeded),
            OrderRequest::CreateOrder {
                id,
                part_name,
                secondary,
            } => self
                .create_order(stub, id, part_name, secondary)
                .await
                .map(OrderResponse::Record),
            OrderRequest::OrderExists { id } => {
                order_exists(stub, &id).await.map(OrderResponse::Exists)
            }
            OrderRequest::UpdateOrderStatus { id, status } => self
                .update_field(stub, id, MutableField::Status, status)
                .await
                .map(OrderResponse::Written),
            OrderRequest::UpdateEstdDeliveryDate { id, date } => self
                .update_field(stub, id, MutableField::EstimatedDeliveryDate, date)
                .await
                .map(OrderResponse::Written),
            OrderRequest::UpdateSource { id, source } => self
                .update_field(stub, id, MutableField::Source, source)
                .await
                .map(OrderResponse::Written),
            OrderRequest::UpdateAdditionalComments { id, comment } => self
                .update_field(stub, id, MutableField::AdditionalComments, comment)
                .await
                .map(OrderResponse::Written),
            OrderRequest::UpdateTrackId { id, track_id } => self
                .update_field(stub, id, MutableField::TrackId, track_id)
                .await
                .map(OrderResponse::Written),
            OrderRequest::UpdateChainOfCustody { id, entry } => self
                .append(stub, id, OrderLog::ChainOfCustody, entry)
                .await
                .map(OrderResponse::Written),
            OrderRequest::AddEvent { id, event } => {
                self.require_products(operation)?;
                self.append(stub, id, OrderLog::Events, event)
                    .await
                    .map(OrderResponse::Written)
            }
            OrderRequest::GetOrderDetails { id } => self
                .get_order_details(stub, &id)
                .await
                .map(OrderResponse::Record),
            OrderRequest::GetChainOfCustody { id } => self
                .get_log(stub, &id, OrderLog::ChainOfCustody)
                .await
                .map(OrderResponse::Log),
            OrderRequest::GetEvents { id } => {
                self.require_products(operation)?;
                self.get_log(stub, &id, OrderLog::Events)
                    .await
                    .map(OrderResponse::Log)
            }
            OrderRequest::GetCurrentOwner { id } => {
                self.require_products(operation)?;
                self.get_current_owner(stub, &id)
                    .await
                    .map(OrderResponse::Owner)
            }
            OrderRequest::GetAllOrders => self.get_all_orders(stub).await.map(OrderResponse::Orders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ledger::MemoryStore;

    const STAMP: &str = "2005-10-30 T 10:45UTC";

    fn contract(variant: Variant) -> OrderContract {
        let config = LedgerConfig {
            variant,
            ..LedgerConfig::default()
        };
        OrderContract::new(config, Arc::new(FixedClock::at(2005, 10, 30, 10, 45).unwrap()))
    }

    fn narrative() -> String {
        format!("Order received to SDLC parts [{STAMP}]")
    }

    async fn create(contract: &OrderContract, store: &mut MemoryStore, id: &str) -> String {
        match contract
            .invoke(
                store,
                OrderRequest::CreateOrder {
                    id: id.into(),
                    part_name: "Compressor".into(),
                    secondary: SecondaryIdentifiers::new("1", "2", "3"),
                },
            )
            .await
            .unwrap()
        {
            OrderResponse::Record(document) => document,
            other => panic!("unexpected response {other:?}"),
        }
    }

    async fn stored(store: &MemoryStore, id: &str) -> Order {
        read_order(store, id).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_order_in_orders_ledger() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        let document = create(&contract, &mut store, "A1").await;

        let order = stored(&store, "A1").await;
        assert_eq!(document, order.to_json().unwrap());
        assert_eq!(order.status, narrative());
        assert_eq!(order.chain_of_custody, vec![narrative()]);
        assert_eq!(order.time_stamp_part_ordered, STAMP);
        assert_eq!(order.events, None);
        assert!(order.secondary.is_empty());
        for field in [
            &order.estimated_delivery_date,
            &order.source,
            &order.additional_comments,
            &order.track_id,
        ] {
            assert_eq!(field, "NA");
        }
        assert_eq!(order.doc_type, "order");
    }

    #[tokio::test]
    async fn test_create_order_in_products_ledger() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "P1").await;

        let order = stored(&store, "P1").await;
        assert_eq!(order.events, Some(vec![narrative()]));
        assert_eq!(order.chain_of_custody, vec!["SDLC parts".to_string()]);
        assert_eq!(order.secondary, SecondaryIdentifiers::new("1", "2", "3"));

        let owner = contract
            .invoke(&mut store, OrderRequest::GetCurrentOwner { id: "P1".into() })
            .await
            .unwrap();
        assert_eq!(owner, OrderResponse::Owner("SDLC parts".into()));
    }

    #[tokio::test]
    async fn test_create_overwrites_by_default() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "A1").await;
        contract
            .invoke(
                &mut store,
                OrderRequest::UpdateTrackId {
                    id: "A1".into(),
                    track_id: "T-1".into(),
                },
            )
            .await
            .unwrap();

        create(&contract, &mut store, "A1").await;
        assert_eq!(stored(&store, "A1").await.track_id, "NA");
    }

    #[tokio::test]
    async fn test_create_rejects_existing_when_configured() {
        let config = LedgerConfig {
            create_policy: CreatePolicy::RejectIfExists,
            ..LedgerConfig::default()
        };
        let contract = OrderContract::new(config, Arc::new(FixedClock::at(2005, 10, 30, 10, 45).unwrap()));
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "A1").await;

        let err = contract
            .invoke(
                &mut store,
                OrderRequest::CreateOrder {
                    id: "A1".into(),
                    part_name: "Other".into(),
                    secondary: SecondaryIdentifiers::default(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::AlreadyExists("A1".into()));
        assert_eq!(stored(&store, "A1").await.part_name, "Compressor");
    }

    #[tokio::test]
    async fn test_update_changes_exactly_one_field() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "A1").await;
        let before = stored(&store, "A1").await;

        let response = contract
            .invoke(
                &mut store,
                OrderRequest::UpdateSource {
                    id: "A1".into(),
                    source: "Vendor X".into(),
                },
            )
            .await
            .unwrap();
        assert!(matches!(response, OrderResponse::Written(ack) if ack.key == "A1"));

        let mut after = stored(&store, "A1").await;
        assert_eq!(after.source, "Vendor X");
        after.source = before.source.clone();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_repeated_update_is_idempotent() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "A1").await;

        let update = OrderRequest::UpdateEstdDeliveryDate {
            id: "A1".into(),
            date: "2005-11-04".into(),
        };
        contract.invoke(&mut store, update.clone()).await.unwrap();
        let once = stored(&store, "A1").await;
        contract.invoke(&mut store, update).await.unwrap();
        assert_eq!(stored(&store, "A1").await, once);
    }

    #[tokio::test]
    async fn test_update_keeps_unknown_keys_of_sparse_record() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        let sparse = r#"{"ID":"X","Status":"s","PartName":"p","ChainOfCustody":["c"],
            "TimeStampPartOrdered":"t","ContactPhone":"555-1234"}"#;
        store.put_state("X", sparse.as_bytes().to_vec()).await.unwrap();

        contract
            .invoke(
                &mut store,
                OrderRequest::UpdateTrackId {
                    id: "X".into(),
                    track_id: "T-99".into(),
                },
            )
            .await
            .unwrap();
        contract
            .invoke(
                &mut store,
                OrderRequest::UpdateChainOfCustody {
                    id: "X".into(),
                    entry: "UPS".into(),
                },
            )
            .await
            .unwrap();

        let bytes = store.get_state("X").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["ContactPhone"], "555-1234");
        assert_eq!(value["TrackID"], "T-99");
        assert_eq!(value["ChainOfCustody"], serde_json::json!(["c", "UPS"]));
        assert!(value.get("EstimatedDeliveryDate").is_none());
    }

    #[tokio::test]
    async fn test_append_to_non_list_is_encoding_error() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();
        let document = r#"{"ID":"X","Events":"not a list"}"#;
        store.put_state("X", document.as_bytes().to_vec()).await.unwrap();

        let err = contract
            .invoke(
                &mut store,
                OrderRequest::AddEvent {
                    id: "X".into(),
                    event: "e".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Encoding { ref id, .. } if id == "X"));
    }

    #[tokio::test]
    async fn test_update_status_writes_status_field() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "P1").await;

        contract
            .invoke(
                &mut store,
                OrderRequest::UpdateOrderStatus {
                    id: "P1".into(),
                    status: "Shipped".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(stored(&store, "P1").await.status, "Shipped");
    }

    #[tokio::test]
    async fn test_missing_ids_report_call_path_specific_errors() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();

        let err = contract
            .invoke(
                &mut store,
                OrderRequest::UpdateTrackId {
                    id: "nope".into(),
                    track_id: "T".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The asset nope does not exist");

        let err = contract
            .invoke(
                &mut store,
                OrderRequest::AddEvent {
                    id: "nope".into(),
                    event: "e".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::AssetNotFound("nope".into()));

        let err = contract
            .invoke(&mut store, OrderRequest::GetOrderDetails { id: "nope".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The order with Order ID: nope does not exist");

        let err = contract
            .invoke(&mut store, OrderRequest::GetChainOfCustody { id: "nope".into() })
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::OrderNotFound("nope".into()));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_missing() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        store.put_state("blank", Vec::new()).await.unwrap();

        let exists = contract
            .invoke(&mut store, OrderRequest::OrderExists { id: "blank".into() })
            .await
            .unwrap();
        assert_eq!(exists, OrderResponse::Exists(false));
    }

    #[tokio::test]
    async fn test_logs_append_in_order_with_duplicates() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "P1").await;

        for event in ["Packed", "Packed", "Shipped"] {
            contract
                .invoke(
                    &mut store,
                    OrderRequest::AddEvent {
                        id: "P1".into(),
                        event: event.into(),
                    },
                )
                .await
                .unwrap();
        }
        contract
            .invoke(
                &mut store,
                OrderRequest::UpdateChainOfCustody {
                    id: "P1".into(),
                    entry: "UPS".into(),
                },
            )
            .await
            .unwrap();

        let events = contract
            .invoke(&mut store, OrderRequest::GetEvents { id: "P1".into() })
            .await
            .unwrap();
        let expected = serde_json::to_string(&[narrative().as_str(), "Packed", "Packed", "Shipped"]).unwrap();
        assert_eq!(events, OrderResponse::Log(expected));

        let custody = contract
            .invoke(&mut store, OrderRequest::GetChainOfCustody { id: "P1".into() })
            .await
            .unwrap();
        assert_eq!(custody, OrderResponse::Log(r#"["SDLC parts","UPS"]"#.into()));

        let owner = contract
            .invoke(&mut store, OrderRequest::GetCurrentOwner { id: "P1".into() })
            .await
            .unwrap();
        assert_eq!(owner, OrderResponse::Owner("UPS".into()));
    }

    #[tokio::test]
    async fn test_products_only_operations_rejected_in_orders_ledger() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "A1").await;

        for request in [
            OrderRequest::AddEvent {
                id: "A1".into(),
                event: "e".into(),
            },
            OrderRequest::GetEvents { id: "A1".into() },
            OrderRequest::GetCurrentOwner { id: "A1".into() },
        ] {
            let operation = request.name();
            let err = contract.invoke(&mut store, request).await.unwrap_err();
            assert_eq!(
                err,
                OrderError::UnsupportedOperation {
                    operation,
                    variant: Variant::Orders
                }
            );
        }
    }

    #[tokio::test]
    async fn test_empty_custody_chain_has_no_owner() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "P1").await;

        let mut order = stored(&store, "P1").await;
        order.chain_of_custody.clear();
        write_order(&mut store, &order).await.unwrap();

        let err = contract
            .invoke(&mut store, OrderRequest::GetCurrentOwner { id: "P1".into() })
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::EmptyCustodyChain("P1".into()));
    }

    #[tokio::test]
    async fn test_initialize_default_orders() {
        let contract = contract(Variant::Products);
        let mut store = MemoryStore::new();

        let seeded = contract
            .invoke(&mut store, OrderRequest::InitializeDefaultOrders)
            .await
            .unwrap();
        assert_eq!(seeded, OrderResponse::Seeded(3));

        let compressor = stored(&store, "123456").await;
        assert_eq!(compressor.part_name, "Compressor");
        assert_eq!(compressor.chain_of_custody, vec!["Vendor X", "UPS"]);
        assert_eq!(compressor.current_custodian(), Some("UPS"));
        assert_eq!(
            compressor.secondary,
            SecondaryIdentifiers::new("654321", "656565", "666666")
        );

        let drum = stored(&store, "123457").await;
        assert_eq!(drum.part_name, "Washing Drum LG");
        assert_eq!(drum.chain_of_custody, vec!["SDLC parts"]);
        assert_eq!(stored(&store, "123458").await.secondary.sales_order_number.as_deref(), Some("85858585"));
    }

    #[tokio::test]
    async fn test_initialize_default_orders_in_orders_ledger() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        contract
            .invoke(&mut store, OrderRequest::InitializeDefaultOrders)
            .await
            .unwrap();

        let compressor = stored(&store, "123456").await;
        assert_eq!(compressor.chain_of_custody, vec![narrative()]);
        assert!(compressor.secondary.is_empty());
        assert_eq!(compressor.events, None);
    }

    #[tokio::test]
    async fn test_get_all_orders_returns_raw_values() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        create(&contract, &mut store, "B").await;
        create(&contract, &mut store, "A").await;
        store.put_state("C", b"not json".to_vec()).await.unwrap();

        let entries = match contract
            .invoke(&mut store, OrderRequest::GetAllOrders)
            .await
            .unwrap()
        {
            OrderResponse::Orders(entries) => entries,
            other => panic!("unexpected response {other:?}"),
        };
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C"]);
        assert_eq!(entries[0].record.as_order().map(|o| o.id.as_str()), Some("A"));
        assert_eq!(entries[2].record, RecordValue::Raw("not json".into()));
    }

    #[tokio::test]
    async fn test_get_order_details_returns_stored_bytes() {
        let contract = contract(Variant::Orders);
        let mut store = MemoryStore::new();
        let document = create(&contract, &mut store, "A1").await;

        let details = contract
            .invoke(&mut store, OrderRequest::GetOrderDetails { id: "A1".into() })
            .await
            .unwrap();
        assert_eq!(details, OrderResponse::Record(document));
    }
}
