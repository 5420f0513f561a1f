//! Stored aggregates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tradeline_shared::types::{ImportId, PaymentEntryId};

use crate::application::CreditApplication;
use crate::import::Import;
use crate::ledger::CreditLedger;
use crate::schedule::PaymentScheduleEntry;

/// An import together with its payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// The import.
    pub import: Import,
    /// Down payment first, installments once generated.
    pub schedule: Vec<PaymentScheduleEntry>,
}

impl ImportRecord {
    /// Finds a schedule entry by id.
    #[must_use]
    pub fn entry(&self, entry_id: PaymentEntryId) -> Option<&PaymentScheduleEntry> {
        self.schedule.iter().find(|e| e.id == entry_id)
    }

    /// Finds a schedule entry by id for replacement.
    pub fn entry_mut(&mut self, entry_id: PaymentEntryId) -> Option<&mut PaymentScheduleEntry> {
        self.schedule.iter_mut().find(|e| e.id == entry_id)
    }
}

/// Everything serialized under one application's lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// The application and its status axes.
    pub application: CreditApplication,
    /// Opened at admin finalization.
    pub ledger: Option<CreditLedger>,
    /// Imports drawing on this application.
    pub imports: BTreeMap<ImportId, ImportRecord>,
}

impl ApplicationRecord {
    /// Wraps a freshly created application.
    #[must_use]
    pub fn new(application: CreditApplication) -> Self {
        Self {
            application,
            ledger: None,
            imports: BTreeMap::new(),
        }
    }
}
