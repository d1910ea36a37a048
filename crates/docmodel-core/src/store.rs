// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document store seam and index submission.
//!
//! The engine does not talk to a database itself. A backend implements
//! [`DocumentStore`] and [`create_indexes`] drives it:
//!
//! ```text
//! create_indexes(store, model, config)
//!   │
//!   ├─ store.resolve_target(model.collection_name())   ──► Err: StoreError::Resolve
//!   │
//!   └─ for each index of model_indexes_with(model, config.policy), one shared deadline:
//!        store.create_index(&target, &index)
//!          ├─ Ok(name)  ──► report.created
//!          ├─ Err(e)    ──► error! + report.failed, continue
//!          └─ deadline  ──► error! + report.failed, continue
//! ```
//!
//! [`MemoryStore`] is an in-process backend with document-store index rules.

mod memory;

use std::time::Duration;

pub use memory::{MemoryStore, MemoryStoreError};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error};

use crate::{
    IndexFailure, ModelDescriptor, Policy, StoreError,
    index::{IndexDescriptor, model_indexes_with}
};

/// Wait budget used when none is configured.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// Backend that can create indexes on a collection.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl DocumentStore for MongoBackend {
///     type Target = mongodb::Collection<Document>;
///     type Error = mongodb::error::Error;
///
///     async fn resolve_target(&self, collection: &str) -> Result<Self::Target, Self::Error> {
///         Ok(self.db.collection(collection))
///     }
///
///     async fn create_index(&self, target: &Self::Target, index: &IndexDescriptor)
///         -> Result<String, Self::Error> {
///         // build IndexModel from index.keys()
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Handle to a collection.
    type Target: Send + Sync;

    /// Backend error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up the collection with the given name.
    async fn resolve_target(&self, collection: &str) -> Result<Self::Target, Self::Error>;

    /// Create one index, returning its name as reported by the backend.
    async fn create_index(
        &self,
        target: &Self::Target,
        index: &IndexDescriptor
    ) -> Result<String, Self::Error>;
}

/// Bounds on store interaction.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Total time allowed for one index batch.
    pub wait:   Duration,
    /// Policy naming the timestamp keys to index.
    pub policy: Policy
}

impl StoreConfig {
    /// Create a config with the given wait budget.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            policy: Policy::DEFAULT
        }
    }

    /// Use another policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}

/// What happened to each index of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Collection the batch targeted.
    pub collection: String,
    /// Names returned by the store for created indexes.
    pub created:    Vec<String>,
    /// Indexes that were not created.
    pub failed:     Vec<IndexFailure>
}

impl IndexReport {
    /// Check if every index was created.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create every index declared on `model`.
///
/// Individual failures do not stop the batch. Once the wait budget is spent,
/// each remaining index is reported as timed out.
///
/// # Errors
///
/// Returns [`StoreError::Resolve`] if the collection cannot be resolved.
pub async fn create_indexes<S>(
    store: &S,
    model: &ModelDescriptor,
    config: &StoreConfig
) -> Result<IndexReport, StoreError<S::Error>>
where
    S: DocumentStore + ?Sized
{
    let collection = model.collection_name();
    let deadline = Instant::now() + config.wait;

    let target = store
        .resolve_target(collection)
        .await
        .map_err(|source| StoreError::Resolve {
            collection: collection.to_owned(),
            source
        })?;

    let mut report = IndexReport {
        collection: collection.to_owned(),
        ..IndexReport::default()
    };

    for index in model_indexes_with(model, &config.policy) {
        match timeout_at(deadline, store.create_index(&target, &index)).await {
            Ok(Ok(name)) => {
                debug!(collection, index = %name, "index created");
                report.created.push(name);
            }
            Ok(Err(err)) => {
                error!(collection, index = index.name(), error = %err, "could not create index");
                report.failed.push(IndexFailure::Rejected {
                    name:   index.name().to_owned(),
                    reason: err.to_string()
                });
            }
            Err(_) => {
                error!(collection, index = index.name(), "timed out creating index");
                report.failed.push(IndexFailure::TimedOut {
                    name: index.name().to_owned()
                });
            }
        }
    }

    Ok(report)
}

/// Create indexes for several models, one batch per model.
///
/// # Errors
///
/// Stops at the first model whose collection cannot be resolved.
pub async fn prepare_collections<S>(
    store: &S,
    models: &[&ModelDescriptor],
    config: &StoreConfig
) -> Result<Vec<IndexReport>, StoreError<S::Error>>
where
    S: DocumentStore + ?Sized
{
    let mut reports = Vec::with_capacity(models.len());
    for model in models {
        reports.push(create_indexes(store, model, config).await?);
    }
    Ok(reports)
}
