//! # Transactions
//!
//! A [`Transaction`] is the store view handed to a contract for one invocation.
//! Writes are buffered in a write set and only reach the underlying store on
//! [`Transaction::commit`]. Reads observe the transaction's own pending writes.
//!
//! A commit is all-or-nothing: if the store rejects any write, the keys already
//! written are restored to their prior values (or removed if they were absent).

use crate::ledger::error::StoreError;
use crate::ledger::store::{check_range, in_range, KeyValue, StateIterator, StateStore, WriteAck};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;

pub struct Transaction<'a> {
    store: &'a mut dyn StateStore,
    /// `None` marks a pending delete.
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl<'a> Transaction<'a> {
    pub fn new(store: &'a mut dyn StateStore) -> Self {
        Self {
            store,
            writes: BTreeMap::new(),
        }
    }

    /// Number of keys written or deleted so far.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Applies the write set to the underlying store, returning the number of keys changed.
    ///
    /// On failure every key applied so far is rolled back before the error is returned.
    pub async fn commit(self) -> Result<usize, StoreError> {
        let Self { store, writes } = self;
        let count = writes.len();
        let mut applied: Vec<(String, Option<Vec<u8>>)> = Vec::with_capacity(count);

        for (key, value) in writes {
            let prior = match store.get_state(&key).await {
                Ok(prior) => prior,
                Err(e) => {
                    rollback(store, applied).await;
                    return Err(e);
                }
            };
            if let Err(e) = apply(store, &key, value).await {
                rollback(store, applied).await;
                return Err(e);
            }
            applied.push((key, prior));
        }
        Ok(count)
    }
}

async fn apply(
    store: &mut dyn StateStore,
    key: &str,
    value: Option<Vec<u8>>,
) -> Result<(), StoreError> {
    match value {
        Some(value) => store.put_state(key, value).await.map(|_| ()),
        None => store.delete_state(key).await,
    }
}

/// Restores `applied` keys in reverse order. Failures are logged and skipped.
async fn rollback(store: &mut dyn StateStore, applied: Vec<(String, Option<Vec<u8>>)>) {
    for (key, prior) in applied.into_iter().rev() {
        if let Err(e) = apply(store, &key, prior).await {
            warn!(%key, error = %e, "Rollback failed");
        }
    }
}

#[async_trait]
impl StateStore for Transaction<'_> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        self.store.get_state(key).await
    }

    async fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<WriteAck, StoreError> {
        let bytes = value.len();
        self.writes.insert(key.to_string(), Some(value));
        Ok(WriteAck {
            key: key.to_string(),
            bytes,
        })
    }

    async fn delete_state(&mut self, key: &str) -> Result<(), StoreError> {
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator, StoreError> {
        check_range(start, end)?;
        let committed = self.store.get_state_by_range(start, end).await?;
        if self.writes.is_empty() {
            return Ok(committed);
        }

        let mut merged: BTreeMap<String, Vec<u8>> =
            committed.map(|kv| (kv.key, kv.value)).collect();
        for (key, pending) in &self.writes {
            if !in_range(key, start, end) {
                continue;
            }
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(StateIterator::new(
            merged
                .into_iter()
                .map(|(key, value)| KeyValue { key, value })
                .collect(),
        ))
    }
}
