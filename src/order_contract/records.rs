//! Record access layer: existence, read and write of whole order documents.
//!
//! A thin pass-through to the state store. "Exists" means a non-empty value is
//! stored under the id.

use crate::ledger::{StateStore, WriteAck};
use crate::model::{Document, Order};
use crate::order_contract::OrderError;

pub async fn order_exists(stub: &dyn StateStore, id: &str) -> Result<bool, OrderError> {
    let value = stub.get_state(id).await?;
    Ok(value.is_some_and(|bytes| !bytes.is_empty()))
}

/// Returns the stored bytes, or `OrderNotFound` for a missing or empty value.
pub async fn read_order_bytes(stub: &dyn StateStore, id: &str) -> Result<Vec<u8>, OrderError> {
    match stub.get_state(id).await? {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(OrderError::OrderNotFound(id.to_string())),
    }
}

pub async fn read_order(stub: &dyn StateStore, id: &str) -> Result<Order, OrderError> {
    let bytes = read_order_bytes(stub, id).await?;
    Order::from_slice(&bytes).map_err(|e| OrderError::encoding(id, e))
}

/// Serializes `order` and replaces the whole value under its id.
pub async fn write_order(stub: &mut dyn StateStore, order: &Order) -> Result<WriteAck, OrderError> {
    let document = order.to_json().map_err(|e| OrderError::encoding(&order.id, e))?;
    Ok(stub.put_state(&order.id, document.into_bytes()).await?)
}

/// The stored value as a JSON object, for edits that must not drop unknown keys.
pub async fn read_document(stub: &dyn StateStore, id: &str) -> Result<Document, OrderError> {
    let bytes = read_order_bytes(stub, id).await?;
    serde_json::from_slice(&bytes).map_err(|e| OrderError::encoding(id, e))
}

pub async fn write_document(
    stub: &mut dyn StateStore,
    id: &str,
    document: &Document,
) -> Result<WriteAck, OrderError> {
    let bytes = serde_json::to_vec(document).map_err(|e| OrderError::encoding(id, e))?;
    Ok(stub.put_state(id, bytes).await?)
}
