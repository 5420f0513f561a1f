//! Property-based tests for StatusWorkflowEngine.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use tradeline_shared::types::{Currency, ImporterId, Money, UserId};

use crate::application::{CreditApplication, RequestedTerms};
use crate::workflow::approval::{Actor, ActorRole};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::StatusWorkflowEngine;
use crate::workflow::types::{
    AdminStatus, ApplicationState, ApplicationStatus, AxisStatus, FinancialStatus,
    PreAnalysisStatus,
};

fn arb_application() -> impl Strategy<Value = ApplicationStatus> {
    prop::sample::select(ApplicationStatus::ALL)
}

fn arb_pre_analysis() -> impl Strategy<Value = PreAnalysisStatus> {
    prop::sample::select(PreAnalysisStatus::ALL)
}

fn arb_financial() -> impl Strategy<Value = FinancialStatus> {
    prop::sample::select(FinancialStatus::ALL)
}

fn arb_admin() -> impl Strategy<Value = AdminStatus> {
    prop::sample::select(AdminStatus::ALL)
}

/// Any composite state, including ones the engine itself would never produce.
fn arb_state() -> impl Strategy<Value = ApplicationState> {
    (arb_application(), arb_pre_analysis(), arb_financial(), arb_admin()).prop_map(
        |(application, pre_analysis, financial, admin)| ApplicationState {
            application,
            pre_analysis,
            financial,
            admin,
        },
    )
}

fn arb_target() -> impl Strategy<Value = AxisStatus> {
    prop::sample::select(AxisStatus::all().collect::<Vec<_>>())
}

fn arb_role() -> impl Strategy<Value = ActorRole> {
    prop_oneof![
        Just(ActorRole::Importer),
        Just(ActorRole::Reviewer),
        Just(ActorRole::FinancialInstitution),
        Just(ActorRole::Admin),
    ]
}

fn application_in(state: ApplicationState) -> (CreditApplication, ImporterId) {
    let importer_id = ImporterId::new();
    let requested = RequestedTerms {
        amount: Money::new(dec!(1000), Currency::Usd),
        terms: vec![30],
    };
    let mut app = CreditApplication::new(importer_id, requested, Utc::now());
    app.state = state;
    (app, importer_id)
}

fn actor(role: ActorRole, importer_id: ImporterId) -> Actor {
    match role {
        ActorRole::Importer => Actor::importer(UserId::new(), importer_id),
        other => Actor::staff(UserId::new(), other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// A move absent from the table fails from every state, for every role.
    #[test]
    fn prop_moves_outside_table_always_fail(
        state in arb_state(),
        to in arb_target(),
        role in arb_role(),
    ) {
        let (app, importer_id) = application_in(state);
        let from = state.get(to.axis());
        prop_assume!(!StatusWorkflowEngine::can_transition(to.axis(), from, to));

        let result = StatusWorkflowEngine::apply_transition(
            &app,
            to,
            &actor(role, importer_id),
            Utc::now(),
            Some("reason".to_string()),
        );
        prop_assert!(result.is_err());
    }

    /// Every accepted move is a table edge that satisfies the preconditions,
    /// and changes exactly one axis.
    #[test]
    fn prop_accepted_moves_are_legal(
        state in arb_state(),
        to in arb_target(),
        role in arb_role(),
    ) {
        let (app, importer_id) = application_in(state);
        let axis = to.axis();
        let from = state.get(axis);

        if let Ok(next) = StatusWorkflowEngine::apply_transition(
            &app,
            to,
            &actor(role, importer_id),
            Utc::now(),
            Some("reason".to_string()),
        ) {
            prop_assert!(StatusWorkflowEngine::can_transition(axis, from, to));
            prop_assert!(StatusWorkflowEngine::check_preconditions(&state, to).is_ok());
            prop_assert_eq!(next.state, state.with(to));
            prop_assert_eq!(next.history.len(), 1);
        }
    }

    /// admin_finalized is reached only while financial == approved.
    #[test]
    fn prop_finalization_requires_financial_approval(state in arb_state()) {
        let (app, importer_id) = application_in(state);
        let result = StatusWorkflowEngine::apply_transition(
            &app,
            AxisStatus::Admin(AdminStatus::AdminFinalized),
            &actor(ActorRole::Admin, importer_id),
            Utc::now(),
            None,
        );

        match result {
            Ok(next) => {
                prop_assert_eq!(state.financial, FinancialStatus::Approved);
                prop_assert_eq!(next.state.admin, AdminStatus::AdminFinalized);
            }
            Err(err) => {
                let is_transition_error = matches!(
                    err,
                    WorkflowError::IllegalTransition { .. } | WorkflowError::PreconditionFailed { .. }
                );
                prop_assert!(is_transition_error);
            }
        }
    }

    /// A terminal application status refuses every move on every axis.
    #[test]
    fn prop_terminal_application_freezes_everything(
        state in arb_state(),
        to in arb_target(),
        role in arb_role(),
    ) {
        prop_assume!(state.application.is_terminal());
        let (app, importer_id) = application_in(state);
        let result = StatusWorkflowEngine::apply_transition(
            &app,
            to,
            &actor(role, importer_id),
            Utc::now(),
            Some("reason".to_string()),
        );
        prop_assert!(result.is_err());
    }
}

/// Exhaustive sweep over every (from, to) pair of every axis, not sampled.
#[test]
fn test_exhaustive_non_edges_rejected() {
    let states: Vec<ApplicationState> = ApplicationStatus::ALL
        .iter()
        .flat_map(|&application| {
            PreAnalysisStatus::ALL.iter().flat_map(move |&pre_analysis| {
                FinancialStatus::ALL.iter().flat_map(move |&financial| {
                    AdminStatus::ALL.iter().map(move |&admin| ApplicationState {
                        application,
                        pre_analysis,
                        financial,
                        admin,
                    })
                })
            })
        })
        .collect();

    let roles = [
        ActorRole::Importer,
        ActorRole::Reviewer,
        ActorRole::FinancialInstitution,
        ActorRole::Admin,
    ];

    let mut checked = 0usize;
    for state in &states {
        let (app, importer_id) = application_in(*state);
        for to in AxisStatus::all() {
            let from = state.get(to.axis());
            if StatusWorkflowEngine::can_transition(to.axis(), from, to) {
                continue;
            }
            for role in roles {
                let result = StatusWorkflowEngine::apply_transition(
                    &app,
                    to,
                    &actor(role, importer_id),
                    Utc::now(),
                    Some("reason".to_string()),
                );
                assert!(result.is_err(), "{state:?} accepted {to:?} for {role:?}");
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}
