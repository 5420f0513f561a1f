//! Property-based tests for CreditLedger.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tradeline_shared::types::{CreditApplicationId, ImportId};

use super::credit::CreditLedger;
use super::error::LedgerError;

#[derive(Debug, Clone)]
enum Op {
    /// Reserve for a fresh import.
    Reserve(Decimal),
    /// Release the n-th import seen so far (modulo count).
    Release(usize),
}

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn limit() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => amount().prop_map(Op::Reserve),
            1 => any::<usize>().prop_map(Op::Release),
        ],
        0..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// After any sequence of reserve/release, usage never exceeds the limit and
    /// available equals limit minus the still-active reservations.
    #[test]
    fn prop_usage_bounded_and_consistent(limit in limit(), ops in ops()) {
        let mut ledger = CreditLedger::new(CreditApplicationId::new(), limit);
        let mut imports: Vec<ImportId> = Vec::new();
        let now = Utc::now();

        for op in ops {
            match op {
                Op::Reserve(amount) => {
                    let import_id = ImportId::new();
                    let before = ledger.available();
                    match ledger.reserve(import_id, amount, now) {
                        Ok(_) => {
                            prop_assert!(amount <= before);
                            imports.push(import_id);
                        }
                        Err(LedgerError::InsufficientCredit { shortfall, available, .. }) => {
                            prop_assert!(amount > before);
                            prop_assert_eq!(available, before);
                            prop_assert_eq!(shortfall, amount - before);
                            prop_assert_eq!(ledger.available(), before);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                    }
                }
                Op::Release(n) => {
                    if !imports.is_empty() {
                        let import_id = imports[n % imports.len()];
                        ledger.release(import_id, now);
                    }
                }
            }

            let active: Decimal = ledger
                .reservations()
                .iter()
                .filter(|r| r.is_active())
                .map(|r| r.amount)
                .sum();
            prop_assert!(ledger.used() <= ledger.limit());
            prop_assert_eq!(ledger.used(), active);
            prop_assert_eq!(ledger.available(), limit - active);
        }
    }

    /// A reservation of exactly the remaining capacity succeeds; one cent more fails.
    #[test]
    fn prop_exact_capacity_boundary(limit in limit(), taken in amount()) {
        let mut ledger = CreditLedger::new(CreditApplicationId::new(), limit);
        let now = Utc::now();
        prop_assume!(taken <= limit);
        ledger.reserve(ImportId::new(), taken, now).unwrap();

        let remaining = ledger.available();
        let over = ledger.reserve(ImportId::new(), remaining + Decimal::new(1, 2), now);
        let is_insufficient = matches!(over, Err(LedgerError::InsufficientCredit { .. }));
        prop_assert!(is_insufficient);
        prop_assert!(ledger.reserve(ImportId::new(), remaining, now).is_ok());
        prop_assert_eq!(ledger.available(), Decimal::ZERO);
    }
}
