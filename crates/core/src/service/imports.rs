//! Import, ledger and payment schedule operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tradeline_shared::types::{CreditApplicationId, ImportId, Money, PaymentEntryId};

use crate::events::DomainEvent;
use crate::finance::CostBreakdown;
use crate::import::{Import, ImportError, ImportLifecycle, ImportStage, StageTrigger};
use crate::ledger::CreditSummary;
use crate::schedule::{PaymentScheduleEntry, PaymentScheduleManager, ScheduleError};
use crate::service::commands::{PaymentEdit, Quote};
use crate::service::error::TradeError;
use crate::service::trade::{TradeFinanceService, ensure_acts_for, ensure_role};
use crate::store::{ApplicationRecord, ImportRecord, StoreError};
use crate::workflow::{Actor, ActorRole};

impl TradeFinanceService {
    /// Creates an import against a finalized application.
    ///
    /// Calculates the cost breakdown from the final terms, reserves the
    /// financed amount and schedules the down payment, all in one commit.
    /// If the reservation does not fit, nothing is created.
    pub async fn create_import(
        &self,
        actor: &Actor,
        application_id: CreditApplicationId,
        fob: Money,
        expected_version: Option<u64>,
    ) -> Result<ImportRecord, TradeError> {
        ensure_role(actor, &[ActorRole::Importer])?;
        let calculator = self.calculator;

        let created = self
            .commit(application_id, expected_version, "create_import", |record, at, events| {
                ensure_acts_for(actor, record.application.importer_id)?;

                let application = &record.application;
                let (Some(terms), Some(ledger)) =
                    (application.final_terms.as_ref(), record.ledger.as_mut())
                else {
                    return Err(ImportError::ApplicationNotOpen(application_id).into());
                };
                if !application.state.is_open_for_imports() {
                    return Err(ImportError::ApplicationNotOpen(application_id).into());
                }
                if fob.currency != application.currency() {
                    return Err(ImportError::CurrencyMismatch {
                        expected: application.currency(),
                        actual: fob.currency,
                    }
                    .into());
                }

                let breakdown = calculator.calculate(
                    fob.amount,
                    terms.down_payment_rate,
                    terms.admin_fee_rate,
                    &terms.terms,
                )?;

                let import_id = ImportId::new();
                let (reservation, change) =
                    ledger.reserve(import_id, breakdown.financed_amount, at)?;
                events.push(DomainEvent::ledger_changed(&change));

                let import = Import {
                    id: import_id,
                    application_id,
                    importer_id: application.importer_id,
                    fob,
                    stage: ImportStage::Planning,
                    terms: terms.terms.clone(),
                    breakdown,
                    reservation_id: reservation.id,
                    delivered_to_agent_on: None,
                    created_at: at,
                    updated_at: at,
                };
                let down_payment = PaymentScheduleManager::down_payment(
                    import_id,
                    &import.breakdown,
                    at.date_naive(),
                    at,
                );
                let created = ImportRecord {
                    import,
                    schedule: vec![down_payment],
                };
                record.imports.insert(import_id, created.clone());
                Ok(created)
            })
            .await?;

        info!(
            %application_id,
            import_id = %created.import.id,
            fob = %created.import.fob,
            financed = %created.import.breakdown.financed_amount,
            "Import created"
        );
        Ok(created)
    }

    /// Cancels an import, releasing its credit and cancelling unpaid entries.
    pub async fn cancel_import(
        &self,
        actor: &Actor,
        import_id: ImportId,
        expected_version: Option<u64>,
    ) -> Result<ImportRecord, TradeError> {
        self.advance_import_stage(actor, import_id, ImportStage::Cancelled, expected_version)
            .await
    }

    /// Moves an import to its next stage, or to cancelled.
    ///
    /// Entering `delivered_to_agent` generates the installments; cancelling
    /// releases the reservation and cancels unpaid entries.
    pub async fn advance_import_stage(
        &self,
        actor: &Actor,
        import_id: ImportId,
        to: ImportStage,
        expected_version: Option<u64>,
    ) -> Result<ImportRecord, TradeError> {
        ensure_role(actor, &[ActorRole::Importer])?;
        let application_id = self.store.application_for_import(import_id)?;
        let schedules = self.schedules;

        let updated = self
            .commit(application_id, expected_version, "advance_import_stage", |record, at, events| {
                ensure_acts_for(actor, record.application.importer_id)?;
                let current = import_record(record, import_id)?;
                let (import, transition) = ImportLifecycle::advance(&current.import, to, at)?;

                let mut schedule = current.schedule.clone();
                match transition.trigger {
                    Some(StageTrigger::DeliveredToAgent { on }) => {
                        let rows = schedules.installments(
                            import_id,
                            &import.breakdown,
                            &import.terms,
                            on,
                            at,
                        )?;
                        events.push(DomainEvent::InstallmentsGenerated {
                            import_id,
                            count: rows.len(),
                            delivered_on: on,
                            at,
                        });
                        schedule.extend(rows);
                    }
                    Some(StageTrigger::Cancelled) => {
                        if let Some(change) = record
                            .ledger
                            .as_mut()
                            .and_then(|ledger| ledger.release(import_id, at))
                        {
                            events.push(DomainEvent::ledger_changed(&change));
                        }
                        PaymentScheduleManager::cancel_unpaid(&mut schedule, at);
                    }
                    None => {}
                }

                events.push(DomainEvent::ImportStageChanged {
                    import_id,
                    application_id,
                    from: transition.from,
                    to: transition.to,
                    at,
                });

                let updated = ImportRecord { import, schedule };
                record.imports.insert(import_id, updated.clone());
                Ok(updated)
            })
            .await?;

        info!(%import_id, stage = %to, "Import stage changed");
        Ok(updated)
    }

    /// Marks a schedule entry paid. Payment never touches the ledger.
    pub async fn record_payment(
        &self,
        actor: &Actor,
        import_id: ImportId,
        entry_id: PaymentEntryId,
        paid_on: NaiveDate,
        expected_version: Option<u64>,
    ) -> Result<PaymentScheduleEntry, TradeError> {
        ensure_role(actor, &[ActorRole::Importer, ActorRole::Admin])?;
        let application_id = self.store.application_for_import(import_id)?;

        let paid = self
            .commit(application_id, expected_version, "record_payment", |record, at, events| {
                ensure_acts_for(actor, record.application.importer_id)?;
                let paid = update_entry(record, import_id, entry_id, |entry| {
                    PaymentScheduleManager::record_payment(entry, paid_on, at)
                })?;
                events.push(DomainEvent::PaymentRecorded {
                    import_id,
                    entry_id,
                    amount: paid.amount,
                    paid_on,
                    at,
                });
                Ok(paid)
            })
            .await?;

        info!(%import_id, %entry_id, amount = %paid.amount, %paid_on, "Payment recorded");
        Ok(paid)
    }

    /// Admin edits the amount or due date of an unpaid entry.
    pub async fn edit_payment_entry(
        &self,
        actor: &Actor,
        import_id: ImportId,
        entry_id: PaymentEntryId,
        edit: PaymentEdit,
        expected_version: Option<u64>,
    ) -> Result<PaymentScheduleEntry, TradeError> {
        ensure_role(actor, &[ActorRole::Admin])?;
        let application_id = self.store.application_for_import(import_id)?;

        let edited = self
            .commit(application_id, expected_version, "edit_payment_entry", |record, at, _| {
                update_entry(record, import_id, entry_id, |entry| {
                    PaymentScheduleManager::edit(entry, edit.amount, edit.due_date, at)
                })
            })
            .await?;

        info!(%import_id, %entry_id, "Payment entry edited");
        Ok(edited)
    }

    /// An import's schedule as it stands on `today`, ordered by due date.
    pub async fn payment_schedule(
        &self,
        actor: &Actor,
        import_id: ImportId,
        today: Option<NaiveDate>,
    ) -> Result<Vec<PaymentScheduleEntry>, TradeError> {
        let record = self.import(actor, import_id).await?;
        let today = today.unwrap_or_else(|| self.clock.today());
        debug!(%import_id, %today, "Payment schedule read");
        Ok(PaymentScheduleManager::view(&record.schedule, today))
    }

    /// Reads an import with its stored schedule.
    pub async fn import(&self, actor: &Actor, import_id: ImportId) -> Result<ImportRecord, TradeError> {
        let application_id = self.store.application_for_import(import_id)?;
        let mut record = self.visible_record(actor, application_id).await?;
        record
            .imports
            .remove(&import_id)
            .ok_or_else(|| StoreError::ImportNotFound(import_id).into())
    }

    /// `limit - sum(active reservations)`; zero until the application is finalized.
    pub async fn available_credit(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
    ) -> Result<Decimal, TradeError> {
        Ok(self.credit_summary(actor, id).await?.available)
    }

    /// Limit, usage and active reservations of an application.
    pub async fn credit_summary(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
    ) -> Result<CreditSummary, TradeError> {
        let record = self.visible_record(actor, id).await?;
        Ok(record.ledger.map_or_else(
            || CreditSummary {
                application_id: id,
                limit: Decimal::ZERO,
                used: Decimal::ZERO,
                available: Decimal::ZERO,
                active_reservations: 0,
            },
            |ledger| ledger.summary(),
        ))
    }

    /// Prices an import against the final terms without reserving anything.
    pub async fn quote(
        &self,
        actor: &Actor,
        id: CreditApplicationId,
        fob: Money,
    ) -> Result<Quote, TradeError> {
        let record = self.visible_record(actor, id).await?;
        let (Some(terms), Some(ledger)) = (record.application.final_terms.as_ref(), record.ledger.as_ref())
        else {
            return Err(ImportError::ApplicationNotOpen(id).into());
        };
        if fob.currency != record.application.currency() {
            return Err(ImportError::CurrencyMismatch {
                expected: record.application.currency(),
                actual: fob.currency,
            }
            .into());
        }

        let breakdown: CostBreakdown = self.calculator.calculate(
            fob.amount,
            terms.down_payment_rate,
            terms.admin_fee_rate,
            &terms.terms,
        )?;
        let available_credit = ledger.available();
        Ok(Quote {
            within_limit: breakdown.financed_amount <= available_credit,
            breakdown,
            available_credit,
        })
    }
}

fn import_record(record: &ApplicationRecord, import_id: ImportId) -> Result<&ImportRecord, TradeError> {
    record
        .imports
        .get(&import_id)
        .ok_or_else(|| StoreError::ImportNotFound(import_id).into())
}

/// Replaces one schedule entry with the result of `change`.
fn update_entry<F>(
    record: &mut ApplicationRecord,
    import_id: ImportId,
    entry_id: PaymentEntryId,
    change: F,
) -> Result<PaymentScheduleEntry, TradeError>
where
    F: FnOnce(&PaymentScheduleEntry) -> Result<PaymentScheduleEntry, ScheduleError>,
{
    let import = record
        .imports
        .get_mut(&import_id)
        .ok_or(StoreError::ImportNotFound(import_id))?;
    let entry = import
        .entry_mut(entry_id)
        .ok_or(ScheduleError::EntryNotFound(entry_id))?;
    let updated = change(entry)?;
    *entry = updated.clone();
    Ok(updated)
}
