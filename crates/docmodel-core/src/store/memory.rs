// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-process [`DocumentStore`].
//!
//! Follows the index rules of a document database:
//!
//! - every collection starts with the implicit `_id_` index
//! - creating an index that already exists with the same keys is a no-op
//! - reusing a name for different keys is rejected

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard}
};

use thiserror::Error;

use super::DocumentStore;
use crate::index::IndexDescriptor;

/// Name of the index every collection has.
pub const ID_INDEX: &str = "_id_";

/// Errors returned by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryStoreError {
    /// An index with this name exists with different keys.
    #[error("index '{name}' already exists with different options")]
    Conflict {
        /// Index name.
        name: String
    },

    /// The collection was never resolved.
    #[error("collection '{0}' does not exist")]
    UnknownCollection(String),

    /// A previous holder of the lock panicked.
    #[error("store lock poisoned")]
    Poisoned
}

/// Collections and their indexes, held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<IndexDescriptor>>>
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<IndexDescriptor>>>, MemoryStoreError> {
        self.collections
            .lock()
            .map_err(|_| MemoryStoreError::Poisoned)
    }

    /// Indexes of a collection, `_id_` first.
    ///
    /// Empty if the collection does not exist.
    #[must_use]
    pub fn indexes(&self, collection: &str) -> Vec<IndexDescriptor> {
        self.lock()
            .ok()
            .and_then(|map| map.get(collection).cloned())
            .unwrap_or_default()
    }

    /// Names of existing collections, sorted.
    #[must_use]
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    type Target = String;
    type Error = MemoryStoreError;

    async fn resolve_target(&self, collection: &str) -> Result<Self::Target, Self::Error> {
        self.lock()?
            .entry(collection.to_owned())
            .or_insert_with(|| vec![IndexDescriptor::single(ID_INDEX, "_id", 1, false)]);
        Ok(collection.to_owned())
    }

    async fn create_index(
        &self,
        target: &Self::Target,
        index: &IndexDescriptor
    ) -> Result<String, Self::Error> {
        let mut map = self.lock()?;
        let existing = map
            .get_mut(target)
            .ok_or_else(|| MemoryStoreError::UnknownCollection(target.clone()))?;

        let position = existing.iter().position(|i| i.name() == index.name());
        match position {
            Some(at) if existing[at].same_keys(index) => {}
            Some(_) => {
                return Err(MemoryStoreError::Conflict {
                    name: index.name().to_owned()
                });
            }
            None => existing.push(index.clone())
        }
        Ok(index.name().to_owned())
    }
}
