//! In-memory application store.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use tradeline_shared::types::{CreditApplicationId, ImportId};

use crate::store::error::StoreError;
use crate::store::record::ApplicationRecord;

/// Concurrent store of application records, one lock per application.
///
/// `DashMap` shards the id lookup; the per-record `tokio::sync::Mutex` is
/// the serialization point for everything that touches one application.
#[derive(Debug, Default)]
pub struct ApplicationStore {
    records: DashMap<CreditApplicationId, Arc<Mutex<ApplicationRecord>>>,
    import_index: DashMap<ImportId, CreditApplicationId>,
}

impl ApplicationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record.
    pub fn insert(&self, record: ApplicationRecord) {
        let id = record.application.id;
        for import_id in record.imports.keys() {
            self.import_index.insert(*import_id, id);
        }
        self.records.insert(id, Arc::new(Mutex::new(record)));
    }

    /// Number of stored applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no application is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Application an import belongs to.
    pub fn application_for_import(
        &self,
        import_id: ImportId,
    ) -> Result<CreditApplicationId, StoreError> {
        self.import_index
            .get(&import_id)
            .map(|entry| *entry.value())
            .ok_or(StoreError::ImportNotFound(import_id))
    }

    /// Snapshot of a record.
    pub async fn read(&self, id: CreditApplicationId) -> Result<ApplicationRecord, StoreError> {
        let handle = self.handle(id)?;
        let record = handle.lock().await;
        Ok(record.clone())
    }

    /// Runs `mutate` on a copy of the record and commits it only on success.
    ///
    /// The application lock is held for the whole call, so concurrent
    /// updates of the same application are applied one after another. A
    /// committed update bumps the application version; `mutate` already sees
    /// the bumped value.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` if `expected_version` is given and differs
    /// from the stored version, `ApplicationNotFound` for an unknown id, or
    /// whatever `mutate` returns. In every error case the stored record is
    /// unchanged.
    pub async fn update<T, E, F>(
        &self,
        id: CreditApplicationId,
        expected_version: Option<u64>,
        mutate: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut ApplicationRecord) -> Result<T, E>,
        E: From<StoreError>,
    {
        let handle = self.handle(id)?;
        let mut guard = handle.lock().await;

        let actual = guard.application.version;
        if let Some(expected) = expected_version
            && expected != actual
        {
            return Err(StoreError::VersionConflict { expected, actual }.into());
        }

        let mut working = guard.clone();
        working.application.version = actual + 1;
        let output = mutate(&mut working)?;

        for import_id in working.imports.keys() {
            if !guard.imports.contains_key(import_id) {
                self.import_index.insert(*import_id, id);
            }
        }
        *guard = working;

        debug!(application_id = %id, version = actual + 1, "Application committed");
        Ok(output)
    }

    fn handle(&self, id: CreditApplicationId) -> Result<Arc<Mutex<ApplicationRecord>>, StoreError> {
        self.records
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(StoreError::ApplicationNotFound(id))
    }
}
