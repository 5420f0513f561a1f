//! The trade finance service.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;
use tradeline_shared::types::{CreditApplicationId, ImporterId};

use crate::events::{DomainEvent, EventBus};
use crate::finance::FinancialCalculator;
use crate::schedule::PaymentScheduleManager;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::TradeError;
use crate::store::{ApplicationRecord, ApplicationStore};
use crate::workflow::{Actor, ActorRole, AxisStatus, StatusWorkflowEngine};

/// Entry point for every business operation.
#[derive(Debug)]
pub struct TradeFinanceService {
    pub(super) store: ApplicationStore,
    pub(super) events: EventBus,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) calculator: FinancialCalculator,
    pub(super) schedules: PaymentScheduleManager,
}

impl TradeFinanceService {
    /// Creates a service rounding money to `decimal_places`, on the wall clock.
    #[must_use]
    pub fn new(decimal_places: u32, events: EventBus) -> Self {
        Self {
            store: ApplicationStore::new(),
            events,
            clock: Arc::new(SystemClock),
            calculator: FinancialCalculator::new(decimal_places),
            schedules: PaymentScheduleManager::new(decimal_places),
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Subscribes to events committed from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// The calculator used for imports and quotes.
    #[must_use]
    pub fn calculator(&self) -> &FinancialCalculator {
        &self.calculator
    }

    /// Runs `mutate` under the application's lock and publishes its events
    /// once the change is committed.
    pub(super) async fn commit<T, F>(
        &self,
        id: CreditApplicationId,
        expected_version: Option<u64>,
        operation: &'static str,
        mutate: F,
    ) -> Result<T, TradeError>
    where
        F: FnOnce(&mut ApplicationRecord, DateTime<Utc>, &mut Vec<DomainEvent>) -> Result<T, TradeError>,
    {
        let at = self.clock.now();
        let mut events = Vec::new();

        let output = self
            .store
            .update(id, expected_version, |record| mutate(record, at, &mut events))
            .await
            .inspect_err(|err| {
                warn!(
                    application_id = %id,
                    operation,
                    code = err.error_code(),
                    error = %err,
                    "Operation rejected"
                );
            })?;

        self.events.publish_all(events);
        Ok(output)
    }

    /// Reads a record the actor is allowed to see.
    pub(super) async fn visible_record(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
    ) -> Result<ApplicationRecord, TradeError> {
        let record = self.store.read(id).await?;
        ensure_acts_for(actor, record.application.importer_id)?;
        Ok(record)
    }
}

/// Applies one status move to the record and queues its event.
pub(super) fn step(
    record: &mut ApplicationRecord,
    to: AxisStatus,
    actor: &Actor,
    at: DateTime<Utc>,
    note: Option<String>,
    events: &mut Vec<DomainEvent>,
) -> Result<(), TradeError> {
    let next = StatusWorkflowEngine::apply_transition(&record.application, to, actor, at, note)?;
    if let Some(change) = next.history.last() {
        events.push(DomainEvent::status_changed(next.id, change));
    }
    record.application = next;
    Ok(())
}

/// Importers only see their own data.
pub(super) fn ensure_acts_for(actor: &Actor, owner: ImporterId) -> Result<(), TradeError> {
    if actor.acts_for(owner) {
        Ok(())
    } else {
        Err(TradeError::Forbidden(format!(
            "user {} does not act for importer {owner}",
            actor.user_id
        )))
    }
}

/// Requires one of `roles`.
pub(super) fn ensure_role(actor: &Actor, roles: &[ActorRole]) -> Result<(), TradeError> {
    if roles.contains(&actor.role) {
        Ok(())
    } else {
        Err(TradeError::Forbidden(format!(
            "role {} may not perform this operation",
            actor.role
        )))
    }
}
