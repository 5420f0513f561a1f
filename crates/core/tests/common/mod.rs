//! Shared setup for service-level tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tradeline_core::application::{ApprovedTerms, CreditApplication, FinalTerms, RequestedTerms};
use tradeline_core::service::{FinancialDecision, FixedClock};
use tradeline_core::workflow::{Actor, ActorRole, PreAnalysisStatus};
use tradeline_core::{EventBus, TradeFinanceService};
use tradeline_shared::types::{Currency, ImporterId, Money, UserId};

/// One actor per role, plus an importer that owns nothing.
pub struct Parties {
    pub importer: Actor,
    pub stranger: Actor,
    pub reviewer: Actor,
    pub institution: Actor,
    pub admin: Actor,
}

impl Parties {
    pub fn new() -> Self {
        Self {
            importer: Actor::importer(UserId::new(), ImporterId::new()),
            stranger: Actor::importer(UserId::new(), ImporterId::new()),
            reviewer: Actor::staff(UserId::new(), ActorRole::Reviewer),
            institution: Actor::staff(UserId::new(), ActorRole::FinancialInstitution),
            admin: Actor::staff(UserId::new(), ActorRole::Admin),
        }
    }
}

pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::Usd)
}

/// A service on a stopped clock.
pub fn service_at(now: DateTime<Utc>) -> (TradeFinanceService, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let service = TradeFinanceService::new(2, EventBus::default()).with_clock(clock.clone());
    (service, clock)
}

/// Drives a new application to `under_review` with pre-analysis `pre_approved`.
pub async fn pre_approved_application(
    service: &TradeFinanceService,
    parties: &Parties,
    amount: Decimal,
    terms: &[u32],
) -> CreditApplication {
    let requested = RequestedTerms {
        amount: usd(amount),
        terms: terms.to_vec(),
    };
    let application = service
        .create_application(&parties.importer, requested)
        .await
        .unwrap();
    let id = application.id;

    service
        .submit_application(&parties.importer, id, None)
        .await
        .unwrap();
    service.start_review(&parties.reviewer, id, None).await.unwrap();
    for to in [PreAnalysisStatus::UnderReview, PreAnalysisStatus::PreApproved] {
        service
            .record_pre_analysis_decision(&parties.reviewer, id, to, None, None)
            .await
            .unwrap();
    }
    service.application(&parties.importer, id).await.unwrap()
}

/// Drives a new application until the financial institution has approved it.
pub async fn financially_approved_application(
    service: &TradeFinanceService,
    parties: &Parties,
    amount: Decimal,
    down_payment_rate: Decimal,
    admin_fee_rate: Decimal,
    terms: &[u32],
) -> CreditApplication {
    let id = pre_approved_application(service, parties, amount, terms).await.id;

    service
        .record_pre_analysis_decision(
            &parties.reviewer,
            id,
            PreAnalysisStatus::SubmittedToFinancial,
            None,
            None,
        )
        .await
        .unwrap();
    service
        .record_financial_decision(&parties.institution, id, FinancialDecision::StartReview, None)
        .await
        .unwrap();
    service
        .record_financial_decision(
            &parties.institution,
            id,
            FinancialDecision::Approve {
                terms: ApprovedTerms {
                    amount,
                    terms: terms.to_vec(),
                    down_payment_rate,
                    admin_fee_rate,
                },
            },
            None,
        )
        .await
        .unwrap()
}

/// Drives a new application all the way to finalized with `limit` as its credit limit.
pub async fn finalized_application(
    service: &TradeFinanceService,
    parties: &Parties,
    limit: Decimal,
    down_payment_rate: Decimal,
    admin_fee_rate: Decimal,
    terms: &[u32],
) -> CreditApplication {
    let id = financially_approved_application(
        service,
        parties,
        limit,
        down_payment_rate,
        admin_fee_rate,
        terms,
    )
    .await
    .id;

    service
        .finalize_admin(
            &parties.admin,
            id,
            FinalTerms {
                credit_limit: limit,
                down_payment_rate,
                admin_fee_rate,
                terms: terms.to_vec(),
            },
            None,
        )
        .await
        .unwrap()
}
