//! Import stage lifecycle.
//!
//! Stages only advance one step at a time. Entering `delivered_to_agent`
//! and cancelling both return an explicit `StageTrigger` so the caller can
//! drive the payment schedule and ledger without the lifecycle knowing
//! about either.

use chrono::{DateTime, Utc};

use crate::import::error::ImportError;
use crate::import::types::{Import, ImportStage, StageTransition, StageTrigger};

/// Stateless stage transition rules.
pub struct ImportLifecycle;

impl ImportLifecycle {
    /// Returns true if `from -> to` is allowed.
    #[must_use]
    pub fn can_move(from: ImportStage, to: ImportStage) -> bool {
        if to == ImportStage::Cancelled {
            return !from.is_terminal();
        }
        from.next() == Some(to)
    }

    /// Moves `import` to `to`, returning the updated import and the transition.
    pub fn advance(
        import: &Import,
        to: ImportStage,
        at: DateTime<Utc>,
    ) -> Result<(Import, StageTransition), ImportError> {
        let from = import.stage;
        if !Self::can_move(from, to) {
            return Err(ImportError::IllegalStageTransition { from, to });
        }

        let mut next = import.clone();
        next.stage = to;
        next.updated_at = at;

        let trigger = match to {
            ImportStage::DeliveredToAgent => {
                let on = at.date_naive();
                next.delivered_to_agent_on = Some(on);
                Some(StageTrigger::DeliveredToAgent { on })
            }
            ImportStage::Cancelled => Some(StageTrigger::Cancelled),
            _ => None,
        };

        Ok((
            next,
            StageTransition {
                from,
                to,
                at,
                trigger,
            },
        ))
    }

    /// Cancels `import` from any live stage.
    pub fn cancel(
        import: &Import,
        at: DateTime<Utc>,
    ) -> Result<(Import, StageTransition), ImportError> {
        Self::advance(import, ImportStage::Cancelled, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::FinancialCalculator;
    use chrono::{NaiveDate, TimeZone};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tradeline_shared::types::{
        CreditApplicationId, Currency, ImportId, ImporterId, Money, ReservationId,
    };

    fn import_at(stage: ImportStage) -> Import {
        let breakdown = FinancialCalculator::default()
            .calculate(dec!(10000), dec!(30), dec!(10), &[30, 60])
            .unwrap();
        let now = Utc::now();
        Import {
            id: ImportId::new(),
            application_id: CreditApplicationId::new(),
            importer_id: ImporterId::new(),
            fob: Money::new(dec!(10000), Currency::Usd),
            stage,
            breakdown,
            terms: vec![30, 60],
            reservation_id: ReservationId::new(),
            delivered_to_agent_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[case(ImportStage::Planning, ImportStage::Production, true)]
    #[case(ImportStage::Production, ImportStage::DeliveredToAgent, true)]
    #[case(ImportStage::DomesticTransport, ImportStage::Completed, true)]
    #[case(ImportStage::Planning, ImportStage::DeliveredToAgent, false)]
    #[case(ImportStage::Transport, ImportStage::Production, false)]
    #[case(ImportStage::Transport, ImportStage::Transport, false)]
    #[case(ImportStage::Planning, ImportStage::Cancelled, true)]
    #[case(ImportStage::DomesticTransport, ImportStage::Cancelled, true)]
    #[case(ImportStage::Completed, ImportStage::Cancelled, false)]
    #[case(ImportStage::Cancelled, ImportStage::Cancelled, false)]
    #[case(ImportStage::Cancelled, ImportStage::Planning, false)]
    fn test_can_move(#[case] from: ImportStage, #[case] to: ImportStage, #[case] allowed: bool) {
        assert_eq!(ImportLifecycle::can_move(from, to), allowed);
    }

    #[test]
    fn test_delivery_emits_trigger_with_date() {
        let import = import_at(ImportStage::Production);
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 14, 30, 0).unwrap();

        let (next, transition) =
            ImportLifecycle::advance(&import, ImportStage::DeliveredToAgent, at).unwrap();

        let on = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(next.stage, ImportStage::DeliveredToAgent);
        assert_eq!(next.delivered_to_agent_on, Some(on));
        assert_eq!(transition.trigger, Some(StageTrigger::DeliveredToAgent { on }));
        assert_eq!(import.stage, ImportStage::Production);
    }

    #[test]
    fn test_plain_advance_has_no_trigger() {
        let import = import_at(ImportStage::Planning);
        let (_, transition) =
            ImportLifecycle::advance(&import, ImportStage::Production, Utc::now()).unwrap();
        assert_eq!(transition.trigger, None);
    }

    #[test]
    fn test_cancel_emits_trigger() {
        let import = import_at(ImportStage::Transport);
        let (next, transition) = ImportLifecycle::cancel(&import, Utc::now()).unwrap();
        assert_eq!(next.stage, ImportStage::Cancelled);
        assert_eq!(transition.from, ImportStage::Transport);
        assert_eq!(transition.trigger, Some(StageTrigger::Cancelled));
    }

    #[test]
    fn test_skipping_a_stage_is_rejected() {
        let import = import_at(ImportStage::Planning);
        assert_eq!(
            ImportLifecycle::advance(&import, ImportStage::Transport, Utc::now()),
            Err(ImportError::IllegalStageTransition {
                from: ImportStage::Planning,
                to: ImportStage::Transport,
            })
        );
    }

    #[test]
    fn test_completed_import_cannot_be_cancelled() {
        let import = import_at(ImportStage::Completed);
        assert!(ImportLifecycle::cancel(&import, Utc::now()).is_err());
    }
}
