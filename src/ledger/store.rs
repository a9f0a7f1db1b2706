//! # State Store
//!
//! The key-value contract the ledger runtime provides to every contract, plus
//! [`MemoryStore`], the ordered in-memory implementation used by the bundled
//! runtime and the tests.
//!
//! Values are opaque bytes. Nothing at this layer knows what a record looks like.

use crate::ledger::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::Bound;

/// One entry yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Acknowledgement returned by a successful `put_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    pub key: String,
    /// Size of the value written, in bytes.
    pub bytes: usize,
}

/// Fully materialised result of [`StateStore::get_state_by_range`].
#[derive(Debug)]
pub struct StateIterator {
    entries: std::vec::IntoIter<KeyValue>,
}

impl StateIterator {
    pub fn new(entries: Vec<KeyValue>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl Iterator for StateIterator {
    type Item = KeyValue;

    fn next(&mut self) -> Option<KeyValue> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Key-value primitives supplied by the ledger.
///
/// # Range semantics
/// `get_state_by_range(start, end)` covers the half-open interval `[start, end)`.
/// An empty `start` means "from the first key" and an empty `end` means
/// "through the last key", so `("", "")` scans the whole key space.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was ever written.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the whole value stored under `key`.
    async fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<WriteAck, StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete_state(&mut self, key: &str) -> Result<(), StoreError>;

    /// Scans `[start, end)` in the store's iteration order.
    async fn get_state_by_range(&self, start: &str, end: &str)
        -> Result<StateIterator, StoreError>;
}

/// Returns true if `key` falls inside the scan interval `[start, end)`.
pub(crate) fn in_range(key: &str, start: &str, end: &str) -> bool {
    (start.is_empty() || key >= start) && (end.is_empty() || key < end)
}

pub(crate) fn check_range(start: &str, end: &str) -> Result<(), StoreError> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return Err(StoreError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Ordered in-memory state store. Iteration is lexicographic by key.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<WriteAck, StoreError> {
        let bytes = value.len();
        self.entries.insert(key.to_string(), value);
        Ok(WriteAck {
            key: key.to_string(),
            bytes,
        })
    }

    async fn delete_state(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<StateIterator, StoreError> {
        check_range(start, end)?;
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };

        let entries = self
            .entries
            .range((lower, upper))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Ok(StateIterator::new(entries))
    }
}
