//! Import domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tradeline_shared::types::{
    CreditApplicationId, ImportId, ImporterId, Money, ReservationId,
};

use crate::finance::CostBreakdown;

/// Lifecycle stage of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    /// Order being planned.
    Planning,
    /// Goods in production.
    Production,
    /// Goods handed to the shipping agent. Installments start here.
    DeliveredToAgent,
    /// International transport.
    Transport,
    /// Customs clearance at destination.
    CustomsClearance,
    /// Domestic leg to the importer.
    DomesticTransport,
    /// Goods received.
    Completed,
    /// Abandoned before completion.
    Cancelled,
}

status_strings!(ImportStage {
    Planning => "planning",
    Production => "production",
    DeliveredToAgent => "delivered_to_agent",
    Transport => "transport",
    CustomsClearance => "customs_clearance",
    DomesticTransport => "domestic_transport",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl ImportStage {
    /// Returns true for `completed` and `cancelled`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The stage that follows this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Planning => Some(Self::Production),
            Self::Production => Some(Self::DeliveredToAgent),
            Self::DeliveredToAgent => Some(Self::Transport),
            Self::Transport => Some(Self::CustomsClearance),
            Self::CustomsClearance => Some(Self::DomesticTransport),
            Self::DomesticTransport => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }
}

/// An import drawing credit from a finalized application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Import id.
    pub id: ImportId,
    /// Application the credit is drawn from.
    pub application_id: CreditApplicationId,
    /// Owning importer.
    pub importer_id: ImporterId,
    /// Declared FOB value.
    pub fob: Money,
    /// Current stage.
    pub stage: ImportStage,
    /// Cost breakdown computed at creation. Never recomputed.
    pub breakdown: CostBreakdown,
    /// Installment day-counts taken from the final terms at creation.
    pub terms: Vec<u32>,
    /// Ledger reservation holding the financed amount.
    pub reservation_id: ReservationId,
    /// Date the goods reached the agent, once they have.
    pub delivered_to_agent_on: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last stage change.
    pub updated_at: DateTime<Utc>,
}

/// Side effect another component must carry out after a stage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageTrigger {
    /// Installments become due, counted from `on`.
    DeliveredToAgent {
        /// Delivery date.
        on: NaiveDate,
    },
    /// Credit must be released and unpaid entries cancelled.
    Cancelled,
}

/// A validated stage change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransition {
    /// Stage before.
    pub from: ImportStage,
    /// Stage after.
    pub to: ImportStage,
    /// When it happened.
    pub at: DateTime<Utc>,
    /// Follow-up work for other components.
    pub trigger: Option<StageTrigger>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_strings() {
        assert_eq!(ImportStage::DeliveredToAgent.as_str(), "delivered_to_agent");
        assert_eq!(ImportStage::parse("customs_clearance"), Some(ImportStage::CustomsClearance));
        assert_eq!(ImportStage::parse("shipped"), None);
    }

    #[test]
    fn test_stage_sequence_ends_at_completed() {
        let mut stage = ImportStage::Planning;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited.len(), 7);
        assert_eq!(stage, ImportStage::Completed);
        assert!(!visited.contains(&ImportStage::Cancelled));
    }

    #[test]
    fn test_terminal_stages() {
        assert!(ImportStage::Completed.is_terminal());
        assert!(ImportStage::Cancelled.is_terminal());
        assert!(!ImportStage::DomesticTransport.is_terminal());
    }
}
