//! Domain events published after each committed change.
//!
//! Notification, report and PDF collaborators subscribe here instead of
//! re-deriving workflow state. Events are only sent once the change that
//! produced them has been committed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;
use tradeline_shared::types::{CreditApplicationId, ImportId, PaymentEntryId, UserId};

use crate::import::ImportStage;
use crate::ledger::LedgerChange;
use crate::workflow::{ActorRole, AxisStatus, StatusAxis, StatusChange};

/// Every event the core emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A status axis moved.
    StatusChanged {
        /// Application that moved.
        application_id: CreditApplicationId,
        /// Axis that moved.
        axis: StatusAxis,
        /// Value before.
        from: AxisStatus,
        /// Value after.
        to: AxisStatus,
        /// Acting user.
        actor_id: UserId,
        /// Role the user acted in.
        actor_role: ActorRole,
        /// When.
        at: DateTime<Utc>,
    },
    /// Credit was reserved or released.
    LedgerChanged {
        /// Application whose ledger changed.
        application_id: CreditApplicationId,
        /// Import that reserved or released.
        import_id: ImportId,
        /// Positive on reserve, negative on release.
        delta: Decimal,
        /// Available credit afterwards.
        available: Decimal,
        /// When.
        at: DateTime<Utc>,
    },
    /// An import changed stage.
    ImportStageChanged {
        /// Import that moved.
        import_id: ImportId,
        /// Application it draws from.
        application_id: CreditApplicationId,
        /// Stage before.
        from: ImportStage,
        /// Stage after.
        to: ImportStage,
        /// When.
        at: DateTime<Utc>,
    },
    /// Installment rows were created for an import.
    InstallmentsGenerated {
        /// Import the rows belong to.
        import_id: ImportId,
        /// Number of rows.
        count: usize,
        /// Delivery date the due dates count from.
        delivered_on: NaiveDate,
        /// When.
        at: DateTime<Utc>,
    },
    /// A schedule entry was paid.
    PaymentRecorded {
        /// Import the entry belongs to.
        import_id: ImportId,
        /// Entry paid.
        entry_id: PaymentEntryId,
        /// Amount paid.
        amount: Decimal,
        /// Settlement date.
        paid_on: NaiveDate,
        /// When.
        at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Builds a `StatusChanged` event from an audit record.
    #[must_use]
    pub fn status_changed(application_id: CreditApplicationId, change: &StatusChange) -> Self {
        Self::StatusChanged {
            application_id,
            axis: change.axis,
            from: change.from,
            to: change.to,
            actor_id: change.actor_id,
            actor_role: change.actor_role,
            at: change.at,
        }
    }

    /// Builds a `LedgerChanged` event.
    #[must_use]
    pub fn ledger_changed(change: &LedgerChange) -> Self {
        Self::LedgerChanged {
            application_id: change.application_id,
            import_id: change.import_id,
            delta: change.delta,
            available: change.available,
            at: change.at,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StatusChanged { .. } => "status_changed",
            Self::LedgerChanged { .. } => "ledger_changed",
            Self::ImportStageChanged { .. } => "import_stage_changed",
            Self::InstallmentsGenerated { .. } => "installments_generated",
            Self::PaymentRecorded { .. } => "payment_recorded",
        }
    }
}

/// Broadcast fan-out of domain events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per slow subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Sends `event` to every current subscriber.
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, event: DomainEvent) {
        let name = event.name();
        let receivers = self.sender.send(event).unwrap_or(0);
        trace!(event = name, receivers, "Event published");
    }

    /// Sends each event in order.
    pub fn publish_all(&self, events: impl IntoIterator<Item = DomainEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}
